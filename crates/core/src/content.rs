//! Content domain rules: visibility, tabcoin display, list strategies.

use crate::types::Timestamp;

/// Placeholder shown in place of `title` and `body` on masked rows.
pub const UNAVAILABLE_TEXT: &str = "[Não disponível]";

/// Placeholder shown in place of `slug` on masked rows.
pub const UNAVAILABLE_SLUG: &str = "nao-disponivel";

/// How far back the `relevant` listing strategy looks.
pub const RANKING_WINDOW_DAYS: i64 = 7;

/// Ordering strategy for content listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStrategy {
    /// Ranked by displayed tabcoins inside the recency window.
    Relevant,
    /// Most recently published first.
    New,
    /// Oldest published first.
    Old,
}

impl ListStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ListStrategy::Relevant => "relevant",
            ListStrategy::New => "new",
            ListStrategy::Old => "old",
        }
    }
}

/// Displayed tabcoin balance for a content row.
///
/// The displayed value is the raw sum of rating amounts, floored at 1 once
/// the row has been published. Rows that never reached `published` keep the
/// raw sum (so a fresh draft shows 0, while a deleted-after-published row
/// still shows at least 1).
pub fn display_tabcoins(credit: i64, debit: i64, published_at: Option<Timestamp>) -> i64 {
    let raw = credit + debit;
    if published_at.is_some() {
        raw.max(1)
    } else {
        raw
    }
}
