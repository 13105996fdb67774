//! Text normalization for rendered fragments

use regex::Regex;
use std::sync::OnceLock;

/// Upper bound on entity decoding passes for multiply-encoded text
const MAX_DECODE_PASSES: usize = 8;

fn whitespace_run() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn blank_line_run() -> &'static Regex {
    static BLANK_LINES: OnceLock<Regex> = OnceLock::new();
    BLANK_LINES.get_or_init(|| Regex::new(r"\n\s*\n\s*\n").expect("valid blank line pattern"))
}

/// Normalize a piece of text into a single clean line
///
/// Entities are decoded before whitespace is collapsed, so encoded
/// whitespace (`&nbsp;`, `&#10;`) is collapsed like literal whitespace.
/// Decoding repeats until the text stops changing, so `&amp;lt;` ends up
/// as `<` and normalizing the result again leaves it unchanged.
///
/// # Arguments
///
/// * `text` - Raw text, possibly containing entities and irregular whitespace
///
/// # Returns
///
/// The decoded text with every whitespace run replaced by one space and no
/// leading or trailing whitespace
pub fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let decoded = decode_entities(text);
    whitespace_run()
        .replace_all(&decoded, " ")
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for _ in 0..MAX_DECODE_PASSES {
        let next = html_escape::decode_html_entities(&decoded);
        if *next == *decoded {
            break;
        }
        decoded = next.into_owned();
    }
    decoded
}

/// Collapse any run containing three or more newlines down to one blank line
pub fn collapse_blank_lines(text: &str) -> String {
    blank_line_run().replace_all(text, "\n\n").into_owned()
}
