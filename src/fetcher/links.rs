//! Documentation link discovery on the listing page

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

use super::error::FetchError;

/// File stem used when neither the link text nor the href yields a name
const FALLBACK_FILENAME: &str = "untitled";

/// A documentation page discovered on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocLink {
    /// Absolute URL of the page
    pub url: String,

    /// Link text as shown in the sidebar
    pub title: String,

    /// File stem the page is saved under
    pub filename: String,
}

fn selector(source: &str) -> Result<Selector, FetchError> {
    Selector::parse(source)
        .map_err(|e| FetchError::HtmlParse(format!("Failed to parse selector '{}': {}", source, e)))
}

/// Turn a title or URL fragment into a safe, lowercase file stem
///
/// Punctuation is dropped, runs of whitespace and dashes become a single
/// dash, and leading/trailing dashes are trimmed.
pub fn sanitize_filename(text: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let disallowed = DISALLOWED.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid pattern"));
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-\s]+").expect("valid pattern"));

    let cleaned = disallowed.replace_all(text, "");
    separators
        .replace_all(&cleaned, "-")
        .trim_matches('-')
        .to_lowercase()
}

/// Find the documentation sidebar on a listing page
fn find_sidebar(document: &Html) -> Result<Option<ElementRef<'_>>, FetchError> {
    if let Some(nav) = document
        .select(&selector(r#"nav[aria-label="Docs sidebar"]"#)?)
        .next()
    {
        return Ok(Some(nav));
    }

    let sidebar_div = document.select(&selector("div[class]")?).find(|div| {
        div.value()
            .classes()
            .any(|class| class.to_lowercase().contains("sidebar"))
    });
    if sidebar_div.is_some() {
        return Ok(sidebar_div);
    }

    if let Some(aside) = document.select(&selector("aside")?).next() {
        return Ok(Some(aside));
    }

    Ok(document
        .select(&selector(r#"[data-testid*="sidebar"]"#)?)
        .next())
}

/// Extract every documentation link from a listing page
///
/// # Arguments
///
/// * `html` - The listing page
/// * `base_url` - URL of the listing page, used to resolve relative links
/// * `link_filter` - Path fragment a resolved URL must contain
///
/// # Returns
///
/// The links in page order. Anchor-only links and links outside the
/// documentation are dropped.
pub fn extract_doc_links(
    html: &str,
    base_url: &Url,
    link_filter: &str,
) -> Result<Vec<DocLink>, FetchError> {
    let document = Html::parse_document(html);
    let anchor = selector("a[href]")?;

    let candidates: Vec<ElementRef<'_>> = match find_sidebar(&document)? {
        Some(sidebar) => sidebar.select(&anchor).collect(),
        None => {
            warn!("Could not find docs sidebar, falling back to all links containing '{}'", link_filter);
            document
                .select(&anchor)
                .filter(|a| a.value().attr("href").is_some_and(|href| href.contains(link_filter)))
                .collect()
        }
    };

    let mut links = Vec::new();
    for element in candidates {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let url = match base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping unresolvable link '{}': {}", href, e);
                continue;
            }
        };
        if !url.as_str().contains(link_filter) {
            continue;
        }

        let title: String = element.text().map(str::trim).collect();
        let stem_source = if title.is_empty() {
            href.rsplit('/').next().unwrap_or_default()
        } else {
            title.as_str()
        };
        let mut filename = sanitize_filename(stem_source);
        if filename.is_empty() {
            filename = FALLBACK_FILENAME.to_string();
        }

        links.push(DocLink {
            url: url.to_string(),
            title,
            filename,
        });
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://konvajs.org/docs/").unwrap()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Getting Started"), "getting-started");
        assert_eq!(sanitize_filename("  Shapes: Rect & Circle!  "), "shapes-rect-circle");
        assert_eq!(sanitize_filename("--already--dashed--"), "already-dashed");
        assert_eq!(sanitize_filename("snake_case stays"), "snake_case-stays");
        assert_eq!(sanitize_filename("?!"), "");
    }

    #[test]
    fn test_links_from_sidebar_nav() {
        let html = r##"
            <html><body>
            <nav aria-label="Docs sidebar">
                <a href="/docs/index.html">Overview</a>
                <a href="shapes/Rect.html"> Rect </a>
                <a href="#top">Top</a>
                <a href="https://github.com/konvajs">GitHub</a>
                <a href="https://konvajs.org/docs/events/Binding_Events.html"></a>
            </nav>
            <a href="/docs/outside.html">Outside</a>
            </body></html>"##;

        let links = extract_doc_links(html, &base(), "/docs/").unwrap();
        assert_eq!(
            links,
            vec![
                DocLink {
                    url: "https://konvajs.org/docs/index.html".to_string(),
                    title: "Overview".to_string(),
                    filename: "overview".to_string(),
                },
                DocLink {
                    url: "https://konvajs.org/docs/shapes/Rect.html".to_string(),
                    title: "Rect".to_string(),
                    filename: "rect".to_string(),
                },
                DocLink {
                    url: "https://konvajs.org/docs/events/Binding_Events.html".to_string(),
                    title: String::new(),
                    filename: "binding_eventshtml".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_sidebar_div_by_class() {
        let html = r#"<div class="theme-DocSidebar-menu"><a href="/docs/a.html">A</a></div>
                      <a href="/docs/b.html">B</a>"#;
        let links = extract_doc_links(html, &base(), "/docs/").unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "A");
    }

    #[test]
    fn test_fallback_without_sidebar() {
        let html = r#"<main><a href="/docs/a.html">A</a><a href="/blog/b.html">B</a></main>"#;
        let links = extract_doc_links(html, &base(), "/docs/").unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://konvajs.org/docs/a.html");
    }
}
