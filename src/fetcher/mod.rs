//! # Documentation Fetcher Module
//!
//! This module archives a documentation website as standalone HTML pages.
//! It is the first stage of the pipeline; the renderer consumes its output.
//!
//! ## Key Components
//!
//! - `FetcherConfig`: Configuration for the fetcher (listing URL, politeness, selectors)
//! - `extract_doc_links`: Discovers documentation pages in the listing's sidebar
//! - `extract_article`: Extracts and sanitizes a page's main content
//! - `Archive`: Writes the wrapped pages and the index to disk
//! - `fetch_docs`: Runs the whole fetch sequentially
//!
//! ## Features
//!
//! - Sidebar discovery with fallbacks for common documentation themes
//! - Relative links and images rewritten to absolute URLs
//! - Navigation, scripts and styles stripped from saved content
//! - Fixed request timeout and delay between requests

mod archive;
mod client;
mod config;
mod error;
mod extraction;
mod links;

pub use archive::{Archive, INDEX_FILE, render_index, render_page};
pub use client::{FetchProgress, FetchReport, PageOutcome, build_client, fetch_docs, fetch_page};
pub use config::{FetcherConfig, FetcherConfigBuilder};
pub use error::FetchError;
pub use extraction::{absolutize, extract_article};
pub use links::{DocLink, extract_doc_links, sanitize_filename};
