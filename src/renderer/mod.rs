//! # HTML to Text Renderer
//!
//! Converts the pages saved by the fetcher into clean, human-readable plain
//! text, and concatenates them into a single combined reference.
//!
//! ## Key Components
//!
//! - `normalize_text`: entity decoding and whitespace collapsing
//! - `render_node`: the recursive walk mapping HTML elements onto a
//!   Markdown-like text rendering
//! - `assemble_document`: title, source line and body of one page
//! - `convert_directory`: batch conversion with per-file failure containment
//!
//! ## Output
//!
//! Every page becomes a document of the form
//!
//! ```text
//! Page Title
//! ==========
//!
//! Source: https://example.com/docs/page
//!
//! ## Heading
//!
//! Body text with `code`, **bold** and *emphasis*.
//! ```
//!
//! The renderer is synchronous and converts one file at a time.

mod batch;
mod config;
mod document;
mod error;
mod node;
mod normalize;

pub use batch::{BatchReport, ConversionFailure, build_combined, collect_inputs, convert_directory};
pub use config::{BANNER_RULE_WIDTH, DOCUMENT_RULE_WIDTH, RendererConfig, RendererConfigBuilder};
pub use document::{
    DEFAULT_TITLE, RenderedDocument, SOURCE_MARKER_SELECTOR, assemble_document, convert_file,
    convert_html,
};
pub use error::RenderError;
pub use node::{BULLET, NodeKind, RenderContext, TABLE_MARKER, render_children, render_node};
pub use normalize::{collapse_blank_lines, normalize_text};
