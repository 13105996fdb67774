//! # Renderer Configuration Module
//!
//! Configuration for the batch HTML-to-text conversion: where the saved pages
//! live, where the text files go, and how the combined reference is named.
//! Uses the same builder pattern as the fetcher configuration.

use std::path::{Path, PathBuf};

/// Width of the separator under the combined file banner
pub const BANNER_RULE_WIDTH: usize = 50;

/// Width of the separator written after each document in the combined file
pub const DOCUMENT_RULE_WIDTH: usize = 80;

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Directory holding the saved HTML pages
    pub input_dir: PathBuf,

    /// Directory the text files are written to (created if absent)
    pub output_dir: PathBuf,

    /// File name of the site index, which is never converted
    pub index_file: String,

    /// Name of the documented site, used for the banner and combined file name
    pub site_name: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("docs/html"),
            output_dir: PathBuf::from("docs/text"),
            index_file: "index.html".to_string(),
            site_name: "KonvaJS".to_string(),
        }
    }
}

/// Builder for RendererConfig
#[derive(Debug, Default)]
pub struct RendererConfigBuilder {
    config: RendererConfig,
}

impl RendererConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    /// Set the input directory
    pub fn input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = input_dir.into();
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    /// Set the reserved index file name
    pub fn index_file(mut self, index_file: impl Into<String>) -> Self {
        self.config.index_file = index_file.into();
        self
    }

    /// Set the site name
    pub fn site_name(mut self, site_name: impl Into<String>) -> Self {
        self.config.site_name = site_name.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> RendererConfig {
        self.config
    }
}

impl RendererConfig {
    /// Create a new builder
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder::new()
    }

    /// First line of the combined reference
    pub fn banner(&self) -> String {
        format!("{} Documentation - Complete Reference", self.site_name)
    }

    /// File name of the combined reference, e.g. `konvajs_complete_docs.txt`
    pub fn combined_file_name(&self) -> String {
        let slug: String = self
            .site_name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        let slug = if slug.is_empty() { "docs".to_string() } else { slug };
        format!("{}_complete_docs.txt", slug)
    }

    /// Full path of the combined reference
    pub fn combined_path(&self) -> PathBuf {
        self.output_dir.join(self.combined_file_name())
    }

    /// Output path for a converted input file
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!("{}.txt", stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = RendererConfig::default();
        assert_eq!(config.banner(), "KonvaJS Documentation - Complete Reference");
        assert_eq!(config.combined_file_name(), "konvajs_complete_docs.txt");
        assert_eq!(config.index_file, "index.html");
    }

    #[test]
    fn test_builder_and_paths() {
        let config = RendererConfig::builder()
            .input_dir("/in")
            .output_dir("/out")
            .site_name("Tokio Docs!")
            .build();

        assert_eq!(config.combined_path(), PathBuf::from("/out/tokiodocs_complete_docs.txt"));
        assert_eq!(
            config.output_path_for(Path::new("/in/getting-started.html")),
            PathBuf::from("/out/getting-started.txt")
        );
    }
}
