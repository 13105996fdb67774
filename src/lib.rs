//! # doc-archive - Documentation Website Archiver
//!
//! This crate archives a documentation website in two independent stages:
//!
//! - **Fetcher**: discovers the pages linked from a documentation sidebar,
//!   extracts each page's main content, and saves it as a standalone HTML
//!   page plus an index.
//! - **Renderer**: converts the saved pages into clean, human-readable plain
//!   text with a Markdown-like layout, and concatenates them into a single
//!   combined reference.
//!
//! The only coupling between the stages is the directory of saved pages.
//!
//! ## Example
//!
//! ```rust,no_run
//! use doc_archive::renderer::{RendererConfig, convert_directory};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RendererConfig::builder()
//!         .input_dir("docs/html")
//!         .output_dir("docs/text")
//!         .build();
//!
//!     let report = convert_directory(&config)?;
//!     println!("Converted {} of {} pages", report.converted, report.attempted);
//!     Ok(())
//! }
//! ```

mod error;

pub mod fetcher;
pub mod renderer;

pub use error::Error;
pub use error::Result;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::fetcher::{FetcherConfig, fetch_docs};
    pub use crate::renderer::{RendererConfig, convert_directory, convert_html};
}
