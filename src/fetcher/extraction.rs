//! Main content extraction and sanitizing for fetched pages

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};
use url::Url;

use super::config::FetcherConfig;
use super::error::FetchError;

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Locate the main content region of a page
///
/// Tries each configured content selector in order, then falls back to
/// `<main>` and finally to a `div` whose class mentions `main`.
fn find_content<'a>(
    document: &'a Html,
    config: &FetcherConfig,
) -> Result<Option<ElementRef<'a>>, FetchError> {
    for selector_str in &config.content_selectors {
        match Selector::parse(selector_str) {
            Ok(selector) => {
                if let Some(element) = document.select(&selector).next() {
                    debug!("Content matched selector '{}'", selector_str);
                    return Ok(Some(element));
                }
            }
            Err(e) => {
                warn!("Failed to parse selector '{}': {}", selector_str, e);
            }
        }
    }

    let main = Selector::parse("main")
        .map_err(|e| FetchError::HtmlParse(format!("Failed to parse main selector: {}", e)))?;
    if let Some(element) = document.select(&main).next() {
        return Ok(Some(element));
    }

    let div = Selector::parse("div[class]")
        .map_err(|e| FetchError::HtmlParse(format!("Failed to parse div selector: {}", e)))?;
    Ok(document.select(&div).find(|element| {
        element
            .value()
            .classes()
            .any(|class| class.to_lowercase().contains("main"))
    }))
}

/// Resolve a link or image reference against the page URL
///
/// References that already start with `http` are kept, as are references
/// that cannot be resolved.
pub fn absolutize(reference: &str, page_url: &Url) -> String {
    if reference.starts_with("http") {
        return reference.to_string();
    }
    page_url
        .join(reference)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| reference.to_string())
}

/// Serializes a content subtree while dropping unwanted tags and rewriting
/// relative references
struct Sanitizer<'a> {
    page_url: &'a Url,
    strip_tags: &'a [String],
}

impl Sanitizer<'_> {
    fn write_node(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(text) => out.push_str(&html_escape::encode_text(&**text)),
            Node::Element(element) => {
                let name = element.name();
                if self.strip_tags.iter().any(|tag| tag == name) {
                    return;
                }

                out.push('<');
                out.push_str(name);
                for (attr, value) in element.attrs() {
                    let rewrite = matches!((name, attr), ("a", "href") | ("img", "src"));
                    let value = if rewrite {
                        absolutize(value, self.page_url)
                    } else {
                        value.to_string()
                    };
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(&value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name) {
                    return;
                }
                for child in node.children() {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
            _ => {}
        }
    }
}

/// Extract the main content of a documentation page as sanitized HTML
///
/// # Arguments
///
/// * `html` - The fetched page
/// * `page_url` - URL the page was fetched from
/// * `config` - Content selectors and tags to strip
///
/// # Returns
///
/// The serialized content region, or `None` when the page has no
/// recognizable content
pub fn extract_article(
    html: &str,
    page_url: &Url,
    config: &FetcherConfig,
) -> Result<Option<String>, FetchError> {
    let document = Html::parse_document(html);

    let Some(content) = find_content(&document, config)? else {
        warn!("Could not find article content for {}", page_url);
        return Ok(None);
    };

    let sanitizer = Sanitizer {
        page_url,
        strip_tags: &config.strip_tags,
    };
    let mut out = String::new();
    sanitizer.write_node(*content, &mut out);
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page_url() -> Url {
        Url::parse("https://konvajs.org/docs/shapes/Rect.html").unwrap()
    }

    #[test]
    fn test_absolutize() {
        let url = page_url();
        assert_eq!(absolutize("/docs/index.html", &url), "https://konvajs.org/docs/index.html");
        assert_eq!(absolutize("Circle.html", &url), "https://konvajs.org/docs/shapes/Circle.html");
        assert_eq!(absolutize("#fill", &url), "https://konvajs.org/docs/shapes/Rect.html#fill");
        assert_eq!(absolutize("https://cdn.example.com/a.png", &url), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_extracts_and_cleans_article() {
        let html = r#"<html><body>
            <nav>menu</nav>
            <article class="doc"><header>Top</header><h1>Rect</h1><script>track()</script><p>Use <a href="../api/Konva.Rect.html">Rect</a> &amp; friends.</p><img src="/img/rect.png"><span title="a &quot;rect&quot; &amp; b">x</span><footer>bottom</footer></article>
            </body></html>"#;

        let content = extract_article(html, &page_url(), &FetcherConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            content,
            r#"<article class="doc"><h1>Rect</h1><p>Use <a href="https://konvajs.org/docs/api/Konva.Rect.html">Rect</a> &amp; friends.</p><img src="https://konvajs.org/img/rect.png"><span title="a &quot;rect&quot; &amp; b">x</span></article>"#
        );
    }

    #[test]
    fn test_falls_back_to_main_class() {
        let html = r#"<html><body><div class="mainContent"><p>Hi</p></div></body></html>"#;
        let content = extract_article(html, &page_url(), &FetcherConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(content, r#"<div class="mainContent"><p>Hi</p></div>"#);
    }

    #[test]
    fn test_no_content() {
        let html = "<html><body><p>Just text</p></body></html>";
        assert_eq!(extract_article(html, &page_url(), &FetcherConfig::default()).unwrap(), None);
    }
}
