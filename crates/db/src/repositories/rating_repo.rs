//! Repository for content ratings (tabcoin transactions).

use sqlx::PgPool;
use uuid::Uuid;

use mural_core::types::Id;

use crate::models::rating::ContentBalances;

/// Error surface of the rating transaction.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// The rater does not hold enough tabcoins to pay the rating cost.
    #[error("insufficient tabcoin balance")]
    InsufficientBalance,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides storage operations for content ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// What a rating costs the rater, in tabcoins.
    pub const RATING_COST: i64 = 2;

    /// Apply a signed rating to a content row.
    ///
    /// In one database transaction: locks the rater's row, charges
    /// [`Self::RATING_COST`] tabcoins, inserts the rating, and mirrors the
    /// signed amount onto the owner's tabcoin balance. Rolls back without
    /// side effects when the rater cannot pay.
    pub async fn rate(
        pool: &PgPool,
        content_id: Id,
        owner_id: Id,
        rater_id: Id,
        amount: i32,
    ) -> Result<ContentBalances, RateError> {
        let mut tx = pool.begin().await?;

        let rater_balance: i64 =
            sqlx::query_scalar("SELECT tabcoins FROM users WHERE id = $1 FOR UPDATE")
                .bind(rater_id)
                .fetch_one(&mut *tx)
                .await?;

        if rater_balance < Self::RATING_COST {
            return Err(RateError::InsufficientBalance);
        }

        sqlx::query("UPDATE users SET tabcoins = tabcoins - $2, updated_at = now() WHERE id = $1")
            .bind(rater_id)
            .bind(Self::RATING_COST)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO content_ratings (id, content_id, user_id, amount)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(content_id)
        .bind(rater_id)
        .bind(amount)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET tabcoins = tabcoins + $2, updated_at = now() WHERE id = $1")
            .bind(owner_id)
            .bind(i64::from(amount))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::balances(pool, content_id).await.map_err(Into::into)
    }

    /// Current rating sums for a content row.
    pub async fn balances(pool: &PgPool, content_id: Id) -> Result<ContentBalances, sqlx::Error> {
        sqlx::query_as::<_, ContentBalances>(
            "SELECT content_tabcoins_credit($1) AS tabcoins_credit,
                    content_tabcoins_debit($1) AS tabcoins_debit",
        )
        .bind(content_id)
        .fetch_one(pool)
        .await
    }
}
