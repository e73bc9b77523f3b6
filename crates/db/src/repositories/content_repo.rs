//! Repository for the `contents` table.
//!
//! Every read returns a [`ContentRecord`]: the raw row joined with the
//! owner's username, the rating sums, and the recursive published-descendant
//! count (via the SQL helper functions created in the migrations).

use sqlx::PgPool;
use uuid::Uuid;

use mural_core::content::{ListStrategy, RANKING_WINDOW_DAYS};
use mural_core::types::Id;

use crate::models::content::{ContentRecord, ContentStatus, CreateContent};

/// Shared SELECT head. Callers append a WHERE clause.
const SELECT_RECORD: &str = "\
SELECT
    c.id,
    c.parent_id,
    c.owner_id,
    c.slug,
    c.title,
    c.body,
    c.status,
    c.source_url,
    c.published_at,
    c.deleted_at,
    c.deactivate_at,
    c.created_at,
    c.updated_at,
    u.username AS owner_username,
    content_tabcoins_credit(c.id) AS tabcoins_credit,
    content_tabcoins_debit(c.id) AS tabcoins_debit,
    published_children_deep_count(c.id) AS children_deep_count
FROM contents c
JOIN users u ON u.id = c.owner_id";

/// Filters for paginated listings of published root contents.
#[derive(Debug, Clone)]
pub struct ListContentsFilter {
    /// Restrict to a single owner (case-insensitive username match).
    pub owner_username: Option<String>,
    pub strategy: ListStrategy,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

/// Provides storage operations for contents.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new content row, returning the full record.
    ///
    /// `published_at` is stamped when the row is created already published
    /// (or sponsored); draft rows receive it on their first transition to
    /// `published` via [`Self::update_status`].
    pub async fn create(pool: &PgPool, input: &CreateContent) -> Result<ContentRecord, sqlx::Error> {
        let id = Uuid::new_v4();
        let publish_now = matches!(
            input.status,
            ContentStatus::Published | ContentStatus::Sponsored
        );
        sqlx::query(
            "INSERT INTO contents
                (id, parent_id, owner_id, slug, title, body, status, source_url,
                 published_at, deactivate_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $9 THEN now() END, $10)",
        )
        .bind(id)
        .bind(input.parent_id)
        .bind(input.owner_id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.status)
        .bind(&input.source_url)
        .bind(publish_now)
        .bind(input.deactivate_at)
        .execute(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a content row by internal ID, regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<ContentRecord>, sqlx::Error> {
        let query = format!("{SELECT_RECORD} WHERE c.id = $1");
        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published content row by owner username + slug.
    ///
    /// Drafts and deleted rows are treated as absent, which is what makes
    /// the parent/thumbnail endpoints report `CONTENT_NOT_FOUND` for them.
    pub async fn find_published_by_owner_and_slug(
        pool: &PgPool,
        username: &str,
        slug: &str,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let query = format!(
            "{SELECT_RECORD}
             WHERE LOWER(u.username) = LOWER($1)
               AND c.slug = $2
               AND c.status = 'published'"
        );
        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(username)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published root contents according to the filter.
    pub async fn list_published(
        pool: &PgPool,
        filter: &ListContentsFilter,
    ) -> Result<Vec<ContentRecord>, sqlx::Error> {
        let order = match filter.strategy {
            ListStrategy::Relevant => {
                "GREATEST(1, ranked.tabcoins_credit + ranked.tabcoins_debit) DESC, \
                 ranked.published_at DESC"
            }
            ListStrategy::New => "ranked.published_at DESC",
            ListStrategy::Old => "ranked.published_at ASC",
        };
        let query = format!(
            "SELECT * FROM ({SELECT_RECORD}
             WHERE c.status = 'published'
               AND c.parent_id IS NULL
               AND ($1::text IS NULL OR LOWER(u.username) = LOWER($1))
               AND ($2::int IS NULL OR c.published_at > now() - make_interval(days => $2))
            ) AS ranked
            ORDER BY {order}
            LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(&filter.owner_username)
            .bind(Self::window_days(filter.strategy))
            .bind(i64::from(filter.per_page))
            .bind(Self::offset(filter))
            .fetch_all(pool)
            .await
    }

    /// Total row count for the same filter, used for pagination headers.
    pub async fn count_published(
        pool: &PgPool,
        filter: &ListContentsFilter,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contents c
             JOIN users u ON u.id = c.owner_id
             WHERE c.status = 'published'
               AND c.parent_id IS NULL
               AND ($1::text IS NULL OR LOWER(u.username) = LOWER($1))
               AND ($2::int IS NULL OR c.published_at > now() - make_interval(days => $2))",
        )
        .bind(&filter.owner_username)
        .bind(Self::window_days(filter.strategy))
        .fetch_one(pool)
        .await
    }

    /// Transition a content row to a new status.
    ///
    /// Stamps `published_at` on the first transition to `published` and
    /// `deleted_at` on the transition to `deleted`. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: Id,
        status: ContentStatus,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let set_published = matches!(
            status,
            ContentStatus::Published | ContentStatus::Sponsored
        );
        let set_deleted = matches!(status, ContentStatus::Deleted);
        let updated = sqlx::query_scalar::<_, Uuid>(
            "UPDATE contents SET
                status = $2,
                published_at = CASE WHEN $3 AND published_at IS NULL THEN now()
                               ELSE published_at END,
                deleted_at = CASE WHEN $4 THEN now() ELSE deleted_at END,
                updated_at = now()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(status)
        .bind(set_published)
        .bind(set_deleted)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    fn window_days(strategy: ListStrategy) -> Option<i32> {
        (strategy == ListStrategy::Relevant).then_some(RANKING_WINDOW_DAYS as i32)
    }

    fn offset(filter: &ListContentsFilter) -> i64 {
        i64::from(filter.page.saturating_sub(1)) * i64::from(filter.per_page)
    }
}
