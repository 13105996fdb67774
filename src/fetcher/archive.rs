//! On-disk archive of fetched pages
//!
//! Each page is wrapped in a standalone, styled HTML document carrying a
//! `div.source-url` marker with the original URL, which the renderer later
//! lifts into the `Source:` line. An `index.html` lists every page.

use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::links::DocLink;

/// File name of the archive index
pub const INDEX_FILE: &str = "index.html";

const PAGE_STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        pre {
            background: #f5f5f5;
            padding: 15px;
            border-radius: 5px;
            overflow-x: auto;
        }
        code {
            background: #f0f0f0;
            padding: 2px 4px;
            border-radius: 3px;
            font-family: 'Monaco', 'Consolas', monospace;
        }
        pre code {
            background: none;
            padding: 0;
        }
        .source-url {
            background: #e3f2fd;
            border-left: 4px solid #2196f3;
            padding: 10px;
            margin: 20px 0;
            font-size: 0.9em;
        }"#;

const INDEX_STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        .header {
            text-align: center;
            border-bottom: 2px solid #eee;
            padding-bottom: 20px;
            margin-bottom: 30px;
        }
        .doc-list {
            list-style: none;
            padding: 0;
        }
        .doc-list li {
            margin: 10px 0;
            padding: 15px;
            background: #f9f9f9;
            border-radius: 5px;
            border-left: 4px solid #2196f3;
        }
        .doc-list a {
            text-decoration: none;
            color: #1976d2;
            font-weight: 500;
        }
        .meta {
            background: #e3f2fd;
            padding: 15px;
            border-radius: 5px;
            margin-bottom: 20px;
        }"#;

fn document_head(title: &str, style: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{style}
    </style>
</head>
"#,
        title = text(title),
    )
}

/// Wrap extracted content in a standalone page
///
/// # Arguments
///
/// * `content` - Sanitized content HTML
/// * `title` - Page title as shown in the sidebar
/// * `url` - URL the content was fetched from
/// * `site_name` - Name of the documented site
pub fn render_page(content: &str, title: &str, url: &str, site_name: &str) -> String {
    let mut page = document_head(&format!("{} - {} Documentation", title, site_name), PAGE_STYLE);
    let _ = write!(
        page,
        r#"<body>
    <div class="source-url">
        <strong>Source:</strong> <a href="{href}" target="_blank">{label}</a>
    </div>
    {content}
</body>
</html>"#,
        href = attr(url),
        label = text(url),
    );
    page
}

/// Build the index page listing every discovered page
pub fn render_index(
    links: &[DocLink],
    site_name: &str,
    base_url: &str,
    scraped_at: DateTime<Local>,
) -> String {
    let mut index = document_head(&format!("{} Documentation - Local Archive", site_name), INDEX_STYLE);
    let _ = write!(
        index,
        r#"<body>
    <div class="header">
        <h1>{site} Documentation</h1>
        <p>Local archive of {site} documentation</p>
    </div>

    <div class="meta">
        <strong>Source:</strong> <a href="{base_href}" target="_blank">{base_label}</a><br>
        <strong>Scraped:</strong> {scraped}<br>
        <strong>Total Pages:</strong> {total}
    </div>

    <h2>Documentation Pages</h2>
    <ul class="doc-list">
"#,
        site = text(site_name),
        base_href = attr(base_url),
        base_label = text(base_url),
        scraped = scraped_at.format("%Y-%m-%d %H:%M:%S"),
        total = links.len(),
    );

    for link in links {
        let _ = write!(
            index,
            r#"        <li>
            <a href="{file}.html">{title}</a>
            <br><small>Source: <a href="{href}" target="_blank">{label}</a></small>
        </li>
"#,
            file = attr(&link.filename),
            title = text(&link.title),
            href = attr(&link.url),
            label = text(&link.url),
        );
    }

    index.push_str("    </ul>\n</body>\n</html>");
    index
}

/// Writes pages and the index into the output directory
#[derive(Debug, Clone)]
pub struct Archive {
    output_dir: PathBuf,
}

impl Archive {
    /// Create an archive rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory the archive writes into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a page with the given file stem is stored at
    pub fn page_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(format!("{}.html", filename))
    }

    /// Path of the index page
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE)
    }

    /// Creates the output directory if needed
    pub async fn ensure_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.output_dir).await
    }

    /// Store a rendered page under the link's file stem
    pub async fn store_page(&self, link: &DocLink, page: &str) -> io::Result<PathBuf> {
        let path = self.page_path(&link.filename);
        fs::write(&path, page).await?;
        Ok(path)
    }

    /// Store the index page
    pub async fn store_index(&self, index: &str) -> io::Result<PathBuf> {
        let path = self.index_path();
        fs::write(&path, index).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn link(title: &str, filename: &str) -> DocLink {
        DocLink {
            url: format!("https://konvajs.org/docs/{}.html", filename),
            title: title.to_string(),
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_render_page_has_marker_and_title() {
        let page = render_page("<article><p>Hi</p></article>", "Rect", "https://konvajs.org/docs/Rect.html", "KonvaJS");
        assert!(page.contains("<title>Rect - KonvaJS Documentation</title>"));
        assert!(page.contains(
            r#"<div class="source-url">
        <strong>Source:</strong> <a href="https://konvajs.org/docs/Rect.html" target="_blank">https://konvajs.org/docs/Rect.html</a>"#
        ));
        assert!(page.contains("<article><p>Hi</p></article>"));
        assert!(page.ends_with("</html>"));
    }

    #[test]
    fn test_render_page_escapes_title() {
        let page = render_page("", "Layers & <Groups>", "https://x.test/a", "Site");
        assert!(page.contains("<title>Layers &amp; &lt;Groups&gt; - Site Documentation</title>"));
    }

    #[test]
    fn test_render_index() {
        let scraped_at = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let links = vec![link("Overview", "overview"), link("Rect", "rect")];
        let index = render_index(&links, "KonvaJS", "https://konvajs.org/docs/", scraped_at);

        assert!(index.contains("<title>KonvaJS Documentation - Local Archive</title>"));
        assert!(index.contains("<strong>Scraped:</strong> 2024-03-05 14:07:09<br>"));
        assert!(index.contains("<strong>Total Pages:</strong> 2"));
        assert!(index.contains(r#"<a href="rect.html">Rect</a>"#));
        assert_eq!(index.matches("<li>").count(), 2);
    }

    #[tokio::test]
    async fn test_store_page_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let archive = Archive::new(dir.path().join("html"));
        archive.ensure_directory().await.unwrap();

        let path = archive.store_page(&link("Rect", "rect"), "<html></html>").await.unwrap();
        assert_eq!(path, dir.path().join("html/rect.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");

        let index = archive.store_index("index").await.unwrap();
        assert_eq!(index, dir.path().join("html").join(INDEX_FILE));
    }
}
