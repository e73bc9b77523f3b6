//! Content entity model, public serialization shape, and masking rules.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mural_core::content::{display_tabcoins, UNAVAILABLE_SLUG, UNAVAILABLE_TEXT};
use mural_core::types::{Id, Timestamp};

/// Lifecycle status of a content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Deleted,
    Sponsored,
}

/// A content row joined with its owner's username, rating aggregates, and
/// published-descendant count. This is what every repository query returns.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRecord {
    pub id: Id,
    pub parent_id: Option<Id>,
    pub owner_id: Id,
    pub slug: String,
    pub title: Option<String>,
    pub body: String,
    pub status: ContentStatus,
    pub source_url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub deactivate_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_username: String,
    /// Sum of positive rating amounts.
    pub tabcoins_credit: i64,
    /// Sum of negative rating amounts (zero or negative).
    pub tabcoins_debit: i64,
    /// Recursive count of published descendants.
    pub children_deep_count: i64,
}

impl ContentRecord {
    /// Whether this row may be shown unmasked to the public: published, or
    /// sponsored with an open visibility window.
    pub fn is_publicly_visible(&self, now: Timestamp) -> bool {
        match self.status {
            ContentStatus::Published => true,
            ContentStatus::Sponsored => self.deactivate_at.is_none_or(|until| until > now),
            ContentStatus::Draft | ContentStatus::Deleted => false,
        }
    }

    /// Displayed tabcoin balance for this row.
    pub fn tabcoins(&self) -> i64 {
        display_tabcoins(self.tabcoins_credit, self.tabcoins_debit, self.published_at)
    }

    /// Convert into the public API shape, masking `title`, `body`, `slug`,
    /// and `children_deep_count` when the row is not publicly visible.
    /// Identifiers, status, timestamps, and tabcoins are always truthful.
    pub fn into_public(self, now: Timestamp) -> ContentPublic {
        let tabcoins = self.tabcoins();
        let masked = !self.is_publicly_visible(now);
        ContentPublic {
            id: self.id,
            owner_id: self.owner_id,
            parent_id: self.parent_id,
            slug: if masked {
                UNAVAILABLE_SLUG.to_string()
            } else {
                self.slug
            },
            title: if masked {
                Some(UNAVAILABLE_TEXT.to_string())
            } else {
                self.title
            },
            body: if masked {
                UNAVAILABLE_TEXT.to_string()
            } else {
                self.body
            },
            status: self.status,
            source_url: self.source_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
            deleted_at: self.deleted_at,
            owner_username: self.owner_username,
            tabcoins,
            children_deep_count: if masked { 0 } else { self.children_deep_count },
        }
    }
}

/// Public API representation of a content row.
#[derive(Debug, Clone, Serialize)]
pub struct ContentPublic {
    pub id: Id,
    pub owner_id: Id,
    pub parent_id: Option<Id>,
    pub slug: String,
    pub title: Option<String>,
    pub body: String,
    pub status: ContentStatus,
    pub source_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub published_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub owner_username: String,
    pub tabcoins: i64,
    pub children_deep_count: i64,
}

/// Public shape extended with the raw rating sums, returned by write
/// endpoints (content creation, rating).
#[derive(Debug, Clone, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub content: ContentPublic,
    pub tabcoins_credit: i64,
    pub tabcoins_debit: i64,
}

/// DTO for inserting a content row. The slug is already resolved.
#[derive(Debug, Clone)]
pub struct CreateContent {
    pub owner_id: Id,
    pub parent_id: Option<Id>,
    pub slug: String,
    pub title: Option<String>,
    pub body: String,
    pub status: ContentStatus,
    pub source_url: Option<String>,
    pub deactivate_at: Option<Timestamp>,
}
