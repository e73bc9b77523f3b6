//! Content rating (tabcoin transaction) model.

use serde::Serialize;
use sqlx::FromRow;

use mural_core::types::{Id, Timestamp};

/// A single signed rating applied to a content row.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRating {
    pub id: Id,
    pub content_id: Id,
    pub user_id: Id,
    /// +1 for a credit, -1 for a debit.
    pub amount: i32,
    pub created_at: Timestamp,
}

/// Aggregated rating sums for one content row.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct ContentBalances {
    pub tabcoins_credit: i64,
    pub tabcoins_debit: i64,
}
