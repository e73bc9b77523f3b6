//! Turns a content row into the display fields the SVG template needs.

use std::sync::LazyLock;

use regex::Regex;

use mural_core::types::Timestamp;

/// Maximum characters kept from the body excerpt.
const MAX_EXCERPT_CHARS: usize = 256;

/// Input for thumbnail generation, mapped from a content record by the API
/// layer so this crate stays independent of the database models.
#[derive(Debug, Clone)]
pub struct ContentCard {
    /// Root contents have a title; comments do not.
    pub title: Option<String>,
    /// Markdown body.
    pub body: String,
    pub owner_username: String,
    pub published_at: Option<Timestamp>,
    pub tabcoins: i64,
    pub comments: i64,
}

/// Plain-text fields ready for the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCard {
    pub title: String,
    pub excerpt: String,
    pub owner_username: String,
    /// `dd/mm/yyyy`, empty when the row has no publication date.
    pub date: String,
    pub tabcoins: i64,
    pub comments: i64,
}

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid fenced-code regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("valid inline-code regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid image regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link regex"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html-tag regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading regex"));
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>\s?").expect("valid blockquote regex"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_~]{1,3}").expect("valid emphasis regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Reduce a markdown body to a single line of plain text.
fn strip_markdown(body: &str) -> String {
    let text = FENCED_CODE.replace_all(body, " ");
    let text = IMAGE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BLOCKQUOTE.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Truncate on a character boundary, appending an ellipsis when shortened.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// Parse a content card into template-ready plain text.
///
/// Comments have no title of their own, so the body excerpt is promoted to
/// the title slot and the excerpt line is left empty.
pub fn parse_card(card: &ContentCard) -> ParsedCard {
    let excerpt = truncate_chars(&strip_markdown(&card.body), MAX_EXCERPT_CHARS);
    let (title, excerpt) = match &card.title {
        Some(title) => (title.clone(), excerpt),
        None => (excerpt, String::new()),
    };
    ParsedCard {
        title,
        excerpt,
        owner_username: card.owner_username.clone(),
        date: card
            .published_at
            .map(|at| at.format("%d/%m/%Y").to_string())
            .unwrap_or_default(),
        tabcoins: card.tabcoins,
        comments: card.comments,
    }
}
