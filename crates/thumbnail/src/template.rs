//! SVG layout for content thumbnails.
//!
//! The document is a fixed 1280x669 card: accent bar, title block, body
//! excerpt, and a footer with author, date, and counters. Text is wrapped
//! here because SVG has no native line breaking.

use crate::parser::ParsedCard;

pub const CARD_WIDTH: u32 = 1280;
pub const CARD_HEIGHT: u32 = 669;

const MARGIN: u32 = 64;
const TITLE_CHARS_PER_LINE: usize = 32;
const TITLE_MAX_LINES: usize = 3;
const TITLE_LINE_HEIGHT: u32 = 82;
const EXCERPT_CHARS_PER_LINE: usize = 74;
const EXCERPT_MAX_LINES: usize = 3;
const EXCERPT_LINE_HEIGHT: u32 = 42;

/// Escape a string for use in SVG text content or attribute values.
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Greedy word wrap into at most `max_lines` lines of roughly
/// `max_chars` characters. The last line gets an ellipsis when the text
/// does not fit; words longer than a line are hard-split.
fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    'words: for word in text.split_whitespace() {
        let mut word = word.to_string();
        // Hard-split words that cannot fit on any line.
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if lines.len() == max_lines {
                truncated = true;
                break 'words;
            }
            let head: String = word.chars().take(max_chars).collect();
            let tail: String = word.chars().skip(max_chars).collect();
            lines.push(head);
            word = tail;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        } else {
            if lines.len() + 1 == max_lines {
                truncated = true;
                lines.push(std::mem::take(&mut current));
                break 'words;
            }
            lines.push(std::mem::take(&mut current));
            current = word;
        }
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            while last.chars().count() > max_chars.saturating_sub(1) {
                last.pop();
            }
            while last.ends_with(' ') {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

fn tspans(lines: &[String], x: u32, line_height: u32) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let dy = if i == 0 { 0 } else { line_height };
            format!(r#"<tspan x="{x}" dy="{dy}">{}</tspan>"#, xml_escape(line))
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    if count.abs() == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Render the card into a standalone SVG document.
pub fn render_template(card: &ParsedCard) -> String {
    let title_lines = wrap_text(&card.title, TITLE_CHARS_PER_LINE, TITLE_MAX_LINES);
    let excerpt_lines = wrap_text(&card.excerpt, EXCERPT_CHARS_PER_LINE, EXCERPT_MAX_LINES);

    let title_block = tspans(&title_lines, MARGIN, TITLE_LINE_HEIGHT);
    let excerpt_y = 180 + TITLE_LINE_HEIGHT * title_lines.len() as u32;
    let excerpt_block = tspans(&excerpt_lines, MARGIN, EXCERPT_LINE_HEIGHT);

    let byline = match card.date.as_str() {
        "" => xml_escape(&card.owner_username),
        date => format!("{} · {date}", xml_escape(&card.owner_username)),
    };
    let counters = format!(
        "{} · {}",
        pluralize(card.tabcoins, "tabcoin", "tabcoins"),
        pluralize(card.comments, "comentário", "comentários"),
    );

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}">
  <rect width="{CARD_WIDTH}" height="{CARD_HEIGHT}" fill="#ffffff"/>
  <rect width="{CARD_WIDTH}" height="10" fill="#24292f"/>
  <text x="{MARGIN}" y="180" font-family="Roboto" font-size="64" font-weight="bold" fill="#24292f">
    {title_block}
  </text>
  <text x="{MARGIN}" y="{excerpt_y}" font-family="Roboto" font-size="30" fill="#57606a">
    {excerpt_block}
  </text>
  <text x="{MARGIN}" y="620" font-family="Roboto" font-size="32" font-weight="bold" fill="#24292f">{byline}</text>
  <text x="{end_x}" y="620" text-anchor="end" font-family="Roboto" font-size="32" fill="#57606a">{counters}</text>
</svg>
"##,
        end_x = CARD_WIDTH - MARGIN,
    )
}
