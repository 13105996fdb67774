//! Recursive HTML-to-text rendering
//!
//! Every element is classified into a [`NodeKind`] and rendered according to
//! the rules for that kind. Block-level kinds are padded with one leading and
//! one trailing newline, inline kinds never inject newlines. Kinds without a
//! dedicated rule fall back to the normalized text of their subtree.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::normalize::normalize_text;

/// Marker line emitted before table rows
pub const TABLE_MARKER: &str = "[TABLE CONTENT]";

/// Prefix used for unordered list items
pub const BULLET: &str = "• ";

/// Rendering category of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1` through `h6`, carrying the level
    Heading(usize),
    Paragraph,
    UnorderedList,
    OrderedList,
    /// `li` reached outside of its list
    ListItem,
    Preformatted,
    /// `code` that is not the direct child of a `pre`
    InlineCode,
    BlockQuote,
    Link,
    /// `div`, `section`, `article` and `main`
    Container,
    LineBreak,
    Strong,
    Emphasis,
    Table,
    Other,
}

impl NodeKind {
    /// Classify a tag name
    pub fn from_tag(name: &str) -> Self {
        match name {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "pre" => Self::Preformatted,
            "code" => Self::InlineCode,
            "blockquote" => Self::BlockQuote,
            "a" => Self::Link,
            "div" | "section" | "article" | "main" => Self::Container,
            "br" => Self::LineBreak,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "table" => Self::Table,
            _ => Self::Other,
        }
    }

    /// Classify an element, taking its position in the tree into account
    pub fn of(element: ElementRef<'_>) -> Self {
        match Self::from_tag(element.value().name()) {
            Self::InlineCode if parent_is(element, "pre") => Self::Other,
            kind => kind,
        }
    }
}

/// State threaded through the tree walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Nesting depth, two spaces of list indentation per level
    pub depth: usize,
}

impl RenderContext {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Indentation prefix for list items at this depth
    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

fn parent_is(element: ElementRef<'_>, tag: &str) -> bool {
    element
        .parent()
        .and_then(|parent| parent.value().as_element().map(|e| e.name() == tag))
        .unwrap_or(false)
}

/// Normalized text of the whole subtree
pub fn subtree_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}

fn child_elements<'a>(element: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

fn descendant_elements<'a>(
    element: ElementRef<'a>,
    tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |child| tags.contains(&child.value().name()))
}

/// Render a single element into a formatted fragment
pub fn render_node(element: ElementRef<'_>, ctx: RenderContext) -> String {
    match NodeKind::of(element) {
        NodeKind::Heading(level) => {
            let text = subtree_text(element);
            if text.is_empty() {
                String::new()
            } else {
                format!("\n{} {}\n", "#".repeat(level), text)
            }
        }
        NodeKind::Paragraph => block(&subtree_text(element)),
        NodeKind::UnorderedList => render_list(element, ctx, false),
        NodeKind::OrderedList => render_list(element, ctx, true),
        NodeKind::ListItem => String::new(),
        NodeKind::Preformatted => {
            let raw: String = element.text().collect();
            if raw.trim().is_empty() {
                String::new()
            } else {
                format!("\n```\n{}\n```\n", raw.trim_end())
            }
        }
        NodeKind::InlineCode => wrap_inline(&subtree_text(element), "`"),
        NodeKind::BlockQuote => {
            let text = subtree_text(element);
            let quoted = text
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("> {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            block(&quoted)
        }
        NodeKind::Link => {
            let text = subtree_text(element);
            match element.value().attr("href") {
                _ if text.is_empty() => String::new(),
                Some(href) if !href.is_empty() => format!("{} ({})", text, href),
                _ => text,
            }
        }
        NodeKind::Container => render_children(element, ctx),
        NodeKind::LineBreak => "\n".to_string(),
        NodeKind::Strong => wrap_inline(&subtree_text(element), "**"),
        NodeKind::Emphasis => wrap_inline(&subtree_text(element), "*"),
        NodeKind::Table => render_table(element),
        NodeKind::Other => subtree_text(element),
    }
}

/// Render the children of an element in document order
///
/// Text children are normalized and appended as-is, element children are
/// rendered at the same depth. Comments and other node types are dropped.
pub fn render_children(element: ElementRef<'_>, ctx: RenderContext) -> String {
    element
        .children()
        .map(|child| render_child(child, ctx))
        .collect()
}

fn render_child(child: NodeRef<'_, Node>, ctx: RenderContext) -> String {
    match child.value() {
        Node::Text(text) => normalize_text(text),
        Node::Element(_) => ElementRef::wrap(child)
            .map(|element| render_node(element, ctx))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn block(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", text)
    }
}

fn wrap_inline(text: &str, marker: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("{marker}{text}{marker}")
    }
}

// Nested lists inside an item are flattened into the item's text; depth is
// not incremented.
fn render_list(element: ElementRef<'_>, ctx: RenderContext, ordered: bool) -> String {
    let indent = ctx.indent();
    let mut out = String::from("\n");
    for (i, item) in child_elements(element, "li").enumerate() {
        let text = subtree_text(item);
        if text.is_empty() {
            continue;
        }
        if ordered {
            out.push_str(&format!("{}{}. {}\n", indent, i + 1, text));
        } else {
            out.push_str(&format!("{}{}{}\n", indent, BULLET, text));
        }
    }
    out.push('\n');
    out
}

fn render_table(element: ElementRef<'_>) -> String {
    let mut out = format!("\n{}\n", TABLE_MARKER);
    for row in descendant_elements(element, &["tr"]) {
        let cells: Vec<String> = descendant_elements(row, &["td", "th"])
            .map(subtree_text)
            .collect();
        if cells.iter().any(|cell| !cell.is_empty()) {
            out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
    }
    out.push('\n');
    out
}
