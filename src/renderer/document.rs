//! Assembly of a complete text document from a saved page

use scraper::{Html, Selector};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::RenderError;
use super::node::{RenderContext, render_children};
use super::normalize::{collapse_blank_lines, normalize_text};

/// Title used when a page has no `<title>` element
pub const DEFAULT_TITLE: &str = "Untitled";

/// CSS selector of the container the fetcher stores the source link in
pub const SOURCE_MARKER_SELECTOR: &str = "div.source-url";

fn selector(source: &str) -> Result<Selector, RenderError> {
    Selector::parse(source)
        .map_err(|e| RenderError::HtmlParse(format!("Failed to parse selector '{}': {}", source, e)))
}

/// A page rendered to text, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Page title
    pub title: String,

    /// URL the page was archived from, if recorded
    pub source_url: Option<String>,

    /// Rendered body with blank lines collapsed and outer whitespace trimmed
    pub body: String,
}

impl RenderedDocument {
    /// Build a document from a title, optional source and raw rendered body
    pub fn new(title: impl Into<String>, source_url: Option<String>, body: &str) -> Self {
        Self {
            title: title.into(),
            source_url,
            body: collapse_blank_lines(body).trim().to_string(),
        }
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f)?;
        if let Some(url) = &self.source_url {
            writeln!(f, "Source: {}", url)?;
            writeln!(f)?;
        }
        write!(f, "{}", self.body)
    }
}

/// Render a saved page into a [`RenderedDocument`]
///
/// The title comes from the first `<title>` element, the source URL from the
/// link inside the source marker. The marker is detached before the body is
/// rendered so the link does not show up twice.
pub fn assemble_document(markup: &str) -> Result<RenderedDocument, RenderError> {
    let mut document = Html::parse_document(markup);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|element| normalize_text(&element.text().collect::<String>()))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let marker = document.select(&selector(SOURCE_MARKER_SELECTOR)?).next();
    let link = selector("a")?;
    let source_url = marker
        .and_then(|element| element.select(&link).next())
        .and_then(|anchor| anchor.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string);

    if let Some(id) = marker.map(|element| element.id()) {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let body = match document.select(&selector("body")?).next() {
        Some(body) => render_children(body, RenderContext::default()),
        None => {
            debug!("Document has no body, falling back to plain text");
            normalize_text(&document.root_element().text().collect::<String>())
        }
    };

    Ok(RenderedDocument::new(title, source_url, &body))
}

/// Convert page markup into the final text document
pub fn convert_html(markup: &str) -> Result<String, RenderError> {
    assemble_document(markup).map(|document| document.to_string())
}

/// Read and convert a single saved page
///
/// Fails when the file cannot be read or is not valid UTF-8.
pub fn convert_file(path: &Path) -> Result<String, RenderError> {
    let markup = fs::read_to_string(path)?;
    convert_html(&markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>Shapes - KonvaJS Documentation</title></head>
<body>
    <div class="source-url">
        <strong>Source:</strong> <a href="https://konvajs.org/docs/shapes/Rect.html" target="_blank">https://konvajs.org/docs/shapes/Rect.html</a>
    </div>
    <article>
        <h2>Intro</h2>
        <p>Draw a <code>Rect</code> on the stage.</p>
        <ul><li>fill</li><li>stroke</li></ul>
    </article>
</body>
</html>"#;

    #[test]
    fn test_full_page() {
        let text = convert_html(PAGE).unwrap();
        let expected = format!(
            "Shapes - KonvaJS Documentation\n{}\n\n\
             Source: https://konvajs.org/docs/shapes/Rect.html\n\n\
             ## Intro\n\n\
             Draw a Rect on the stage.\n\n\
             • fill\n\
             • stroke",
            "=".repeat(30)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_source_marker_is_not_rendered() {
        let text = convert_html(PAGE).unwrap();
        assert_eq!(text.matches("konvajs.org/docs/shapes/Rect.html").count(), 1);
        assert!(!text.contains("**Source:**"));
    }

    #[test]
    fn test_missing_title_defaults() {
        let text = convert_html("<html><body><p>Body</p></body></html>").unwrap();
        assert!(text.starts_with("Untitled\n========\n\nBody"));
        assert!(!text.contains("Source:"));
    }

    #[test]
    fn test_marker_without_link_has_no_source() {
        let document = assemble_document(
            r#"<html><head><title>T</title></head><body><div class="source-url">none</div><p>x</p></body></html>"#,
        )
        .unwrap();
        assert_eq!(document.source_url, None);
        assert_eq!(document.body, "x");
    }

    #[test]
    fn test_collapses_consecutive_newlines() {
        let html = "<html><head><title>T</title></head><body><div><p>a</p><br><br><br><br><p>b</p></div></body></html>";
        let document = assemble_document(html).unwrap();
        assert_eq!(document.body, "a\n\nb");
        assert!(!document.to_string().contains("\n\n\n"));
    }

    #[test]
    fn test_title_is_normalized() {
        let html = "<html><head><title>\n   Shapes &amp;\t Layers &lt;3  </title></head><body><p>x</p></body></html>";
        let text = convert_html(html).unwrap();
        assert_eq!(text, format!("Shapes & Layers <3\n{}\n\nx", "=".repeat(18)));
    }

    #[test]
    fn test_underline_matches_title_length() {
        let document = RenderedDocument::new("Événements", None, "body");
        assert_eq!(document.to_string(), "Événements\n==========\n\nbody");
    }

    #[test]
    fn test_convert_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.html");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        assert!(matches!(convert_file(&path), Err(RenderError::Io(_))));
    }
}
