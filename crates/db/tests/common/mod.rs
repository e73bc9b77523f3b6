//! Shared fixtures for repository tests.

use sqlx::PgPool;
use uuid::Uuid;

use mural_core::slug::slugify;
use mural_core::types::Id;
use mural_db::models::content::{ContentRecord, ContentStatus, CreateContent};
use mural_db::models::user::{CreateUser, User};
use mural_db::repositories::{ContentRepo, UserRepo};

/// Create a user with a unique random username.
pub async fn create_user(pool: &PgPool) -> User {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user{}", &suffix[..12]);
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            email: format!("{username}@example.com"),
            password_hash: "test-hash".into(),
        },
    )
    .await
    .expect("user fixture should insert")
}

/// Create a content row. The slug is derived from the title, or random for
/// title-less children.
pub async fn create_content(
    pool: &PgPool,
    owner_id: Id,
    parent_id: Option<Id>,
    title: Option<&str>,
    status: ContentStatus,
) -> ContentRecord {
    let slug = match title {
        Some(title) => slugify(title),
        None => Uuid::new_v4().simple().to_string()[..12].to_string(),
    };
    ContentRepo::create(
        pool,
        &CreateContent {
            owner_id,
            parent_id,
            slug,
            title: title.map(Into::into),
            body: "Body".into(),
            status,
            source_url: None,
            deactivate_at: None,
        },
    )
    .await
    .expect("content fixture should insert")
}
