//! # Fetcher Configuration Module
//!
//! This module provides configuration options for the documentation fetcher,
//! including the listing page to start from, politeness controls, and the
//! selectors used to locate and clean a page's main content. It uses a
//! builder pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `FetcherConfig`: The main configuration struct with fetcher parameters
//! - `FetcherConfigBuilder`: Builder pattern implementation for easier configuration
//!
//! ## Features
//!
//! - Defaults suitable for polite, sequential fetching (10s timeout, 1s delay)
//! - Ordered content selectors, first match wins
//! - Tags stripped from the saved content (navigation, scripts, styles)

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Listing page the documentation links are discovered from
    pub base_url: String,

    /// Directory the HTML pages and index are written to
    pub output_dir: PathBuf,

    /// Name of the documented site, used in page titles and the index
    pub site_name: String,

    /// Path fragment a URL must contain to count as a documentation page
    pub link_filter: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Delay in milliseconds between page requests
    pub delay_ms: u64,

    /// User agent to use for requests
    pub user_agent: String,

    /// CSS selectors for the main content, tried in order
    pub content_selectors: Vec<String>,

    /// Tags removed from the saved content
    pub strip_tags: Vec<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://konvajs.org/docs/".to_string(),
            output_dir: PathBuf::from("docs/html"),
            site_name: "KonvaJS".to_string(),
            link_filter: "/docs/".to_string(),
            timeout_secs: 10,
            delay_ms: 1000,
            user_agent: format!("doc-archive/{}", env!("CARGO_PKG_VERSION")),
            content_selectors: vec![
                "article".to_string(),
                "main article".to_string(),
                ".markdown".to_string(),
                ".content".to_string(),
                ".documentation-content".to_string(),
                "[role=\"main\"] article".to_string(),
                "main .markdown".to_string(),
                ".docs-content".to_string(),
            ],
            strip_tags: vec![
                "nav".to_string(),
                "aside".to_string(),
                "header".to_string(),
                "footer".to_string(),
                "script".to_string(),
                "style".to_string(),
            ],
        }
    }
}

/// Builder for FetcherConfig
#[derive(Debug, Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: FetcherConfig::default(),
        }
    }

    /// Set the listing page URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// Set the site name
    pub fn site_name(mut self, site_name: impl Into<String>) -> Self {
        self.config.site_name = site_name.into();
        self
    }

    /// Set the path fragment documentation links must contain
    pub fn link_filter(mut self, link_filter: impl Into<String>) -> Self {
        self.config.link_filter = link_filter.into();
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the delay in milliseconds between page requests
    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the CSS selectors for the main content
    pub fn content_selectors(mut self, content_selectors: Vec<String>) -> Self {
        self.config.content_selectors = content_selectors;
        self
    }

    /// Set the tags stripped from saved content
    pub fn strip_tags(mut self, strip_tags: Vec<String>) -> Self {
        self.config.strip_tags = strip_tags;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FetcherConfig {
        self.config
    }
}

impl FetcherConfig {
    /// Create a new builder
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the delay between page requests as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.delay(), Duration::from_millis(1000));
        assert_eq!(config.content_selectors.first().map(String::as_str), Some("article"));
        assert!(config.strip_tags.iter().any(|t| t == "script"));
    }

    #[test]
    fn test_builder() {
        let config = FetcherConfig::builder()
            .base_url("http://localhost:8080/guide/")
            .link_filter("/guide/")
            .delay_ms(0)
            .timeout_secs(2)
            .site_name("Guide")
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/guide/");
        assert_eq!(config.link_filter, "/guide/");
        assert_eq!(config.delay(), Duration::ZERO);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.site_name, "Guide");
    }
}
