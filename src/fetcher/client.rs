//! Sequential retrieval of the documentation pages

use chrono::Local;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};
use url::Url;

use super::archive::{Archive, render_index, render_page};
use super::config::FetcherConfig;
use super::error::FetchError;
use super::extraction::extract_article;
use super::links::{DocLink, extract_doc_links};

/// What happened to a single discovered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PageOutcome {
    /// Saved to the given path
    Saved(PathBuf),
    /// Already saved earlier in this run
    Duplicate,
    /// Fetched, but no main content was found
    NoContent,
    /// Request or write failed
    Failed(String),
}

/// Progress update sent after each page
#[derive(Debug, Clone)]
pub struct FetchProgress {
    /// 1-based position of the page in the discovered list
    pub position: usize,
    /// Number of discovered pages
    pub total: usize,
    /// Page URL
    pub url: String,
    /// Result for the page
    pub outcome: PageOutcome,
}

/// Outcome of a fetch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    /// Number of documentation links found on the listing page
    pub discovered: usize,
    /// Pages written to disk
    pub saved: usize,
    /// Links pointing at an already saved page
    pub duplicates: usize,
    /// Pages without recognizable content
    pub empty: usize,
    /// Pages that could not be fetched or written
    pub failed: usize,
    /// Location of the archive index
    pub index_path: PathBuf,
}

impl FetchReport {
    fn record(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Saved(_) => self.saved += 1,
            PageOutcome::Duplicate => self.duplicates += 1,
            PageOutcome::NoContent => self.empty += 1,
            PageOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Build the HTTP client used for every request of a run
pub fn build_client(config: &FetcherConfig) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .build()?)
}

/// GET a page and return its body, failing on non-success statuses
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

async fn archive_page(
    client: &Client,
    archive: &Archive,
    link: &DocLink,
    config: &FetcherConfig,
) -> Result<PageOutcome, FetchError> {
    let html = fetch_page(client, &link.url).await?;
    let page_url = Url::parse(&link.url)?;

    let Some(content) = extract_article(&html, &page_url, config)? else {
        return Ok(PageOutcome::NoContent);
    };

    let title = if link.title.is_empty() {
        link.filename.as_str()
    } else {
        link.title.as_str()
    };
    let page = render_page(&content, title, &link.url, &config.site_name);
    let path = archive.store_page(link, &page).await?;
    Ok(PageOutcome::Saved(path))
}

/// Fetch the listing page and archive every documentation page it links to
///
/// Pages are fetched one at a time with `config.delay()` between requests.
/// A page that fails is logged and counted; only a failure to fetch the
/// listing page or to write the index aborts the run.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
/// * `progress` - Optional channel receiving an update after each page
#[instrument(skip(config, progress), fields(base_url = %config.base_url))]
pub async fn fetch_docs(
    config: &FetcherConfig,
    progress: Option<mpsc::Sender<FetchProgress>>,
) -> Result<FetchReport, FetchError> {
    info!("Starting documentation fetch");
    let client = build_client(config)?;
    let base_url = Url::parse(&config.base_url)?;
    let archive = Archive::new(&config.output_dir);
    archive.ensure_directory().await?;
    info!("Output directory: {}", archive.output_dir().display());

    let listing = fetch_page(&client, base_url.as_str()).await?;
    let links = extract_doc_links(&listing, &base_url, &config.link_filter)?;
    info!("Found {} documentation links", links.len());

    let index = render_index(&links, &config.site_name, base_url.as_str(), Local::now());
    let index_path = archive.store_index(&index).await?;
    info!("Created index file: {}", index_path.display());

    let mut report = FetchReport {
        discovered: links.len(),
        index_path,
        ..Default::default()
    };
    let mut saved_urls = HashSet::new();

    for (i, link) in links.iter().enumerate() {
        let outcome = if saved_urls.contains(&link.url) {
            info!("Skipping already fetched: {}", link.url);
            PageOutcome::Duplicate
        } else {
            info!("[{}/{}] Fetching: {} ({})", i + 1, links.len(), link.title, link.url);
            let span = info_span!("fetch_page", url = %link.url);
            let outcome = match archive_page(&client, &archive, link, config)
                .instrument(span)
                .await
            {
                Ok(PageOutcome::Saved(path)) => {
                    info!("Saved: {}", path.display());
                    saved_urls.insert(link.url.clone());
                    PageOutcome::Saved(path)
                }
                Ok(PageOutcome::NoContent) => {
                    warn!("No content found for: {}", link.url);
                    PageOutcome::NoContent
                }
                Ok(other) => other,
                Err(e) => {
                    error!("Error fetching {}: {}", link.url, e);
                    PageOutcome::Failed(e.to_string())
                }
            };
            if !config.delay().is_zero() {
                tokio::time::sleep(config.delay()).await;
            }
            outcome
        };

        report.record(&outcome);
        if let Some(sender) = &progress {
            let update = FetchProgress {
                position: i + 1,
                total: links.len(),
                url: link.url.clone(),
                outcome,
            };
            if sender.send(update).await.is_err() {
                debug!("Progress receiver dropped");
            }
        }
    }

    info!(
        "Fetch complete! Saved {} of {} pages",
        report.saved, report.discovered
    );
    Ok(report)
}
