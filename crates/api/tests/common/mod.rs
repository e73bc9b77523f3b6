//! Shared harness for HTTP integration tests.
//!
//! Mirrors the router construction in `main.rs` (via `router::build_app`)
//! so tests exercise the same middleware stack production uses, plus
//! orchestrator-style fixtures that provision users, sessions, and content
//! through the repository layer.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

use mural_api::auth::session::{generate_token, session_ttl};
use mural_api::config::ServerConfig;
use mural_api::router::build_app;
use mural_api::state::AppState;
use mural_core::slug::slugify;
use mural_core::types::Id;
use mural_db::models::content::{ContentRecord, ContentStatus, CreateContent};
use mural_db::models::session::{CreateSession, Session};
use mural_db::models::user::{CreateUser, User};
use mural_db::repositories::{ContentRepo, SessionRepo, UserRepo};

/// Password shared by every fixture user.
pub const TEST_PASSWORD: &str = "senha-correta-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        thumbnail_fonts_dir: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        renderer: Arc::new(mural_thumbnail::Renderer::new(None)),
    };
    build_app(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str) -> Response<Body> {
    use tower::ServiceExt;
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail at the transport level")
}

pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    use tower::ServiceExt;
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail at the transport level")
}

/// POST with a `session_id` cookie attached.
pub async fn post_json_as(
    app: Router,
    path: &str,
    session: &Session,
    body: serde_json::Value,
) -> Response<Body> {
    use tower::ServiceExt;
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("session_id={}", session.token))
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail at the transport level")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user with a unique random username and [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool) -> User {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("user{}", &suffix[..12]);
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            email: format!("{username}@example.com"),
            password_hash: mural_api::auth::password::hash_password(TEST_PASSWORD)
                .expect("hashing should succeed"),
        },
    )
    .await
    .expect("user fixture should insert")
}

/// Create an active session for a user, for cookie-authenticated requests.
pub async fn create_session(pool: &PgPool, user: &User) -> Session {
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            token: generate_token(),
            expires_at: chrono::Utc::now() + session_ttl(),
        },
    )
    .await
    .expect("session fixture should insert")
}

/// Options for [`create_content`], mirroring what tests need to vary.
pub struct ContentFixture<'a> {
    pub owner_id: Id,
    pub parent_id: Option<Id>,
    pub title: Option<&'a str>,
    pub body: &'a str,
    pub status: ContentStatus,
    pub deactivate_at: Option<mural_core::types::Timestamp>,
}

impl<'a> ContentFixture<'a> {
    pub fn root(owner_id: Id, title: &'a str) -> Self {
        Self {
            owner_id,
            parent_id: None,
            title: Some(title),
            body: "Body",
            status: ContentStatus::Published,
            deactivate_at: None,
        }
    }

    pub fn child(owner_id: Id, parent_id: Id, title: &'a str) -> Self {
        Self {
            owner_id,
            parent_id: Some(parent_id),
            title: Some(title),
            body: "Body",
            status: ContentStatus::Published,
            deactivate_at: None,
        }
    }

    /// Turn the fixture into sponsored content with the given window end.
    pub fn sponsored_until(mut self, until: mural_core::types::Timestamp) -> Self {
        self.status = ContentStatus::Sponsored;
        self.deactivate_at = Some(until);
        self
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = body;
        self
    }
}

/// Create a content row. The slug is derived from the title, or random for
/// title-less children.
pub async fn create_content(pool: &PgPool, fixture: ContentFixture<'_>) -> ContentRecord {
    let slug = match fixture.title {
        Some(title) => slugify(title),
        None => Uuid::new_v4().simple().to_string()[..12].to_string(),
    };
    ContentRepo::create(
        pool,
        &CreateContent {
            owner_id: fixture.owner_id,
            parent_id: fixture.parent_id,
            slug,
            title: fixture.title.map(Into::into),
            body: fixture.body.to_string(),
            status: fixture.status,
            source_url: None,
            deactivate_at: fixture.deactivate_at,
        },
    )
    .await
    .expect("content fixture should insert")
}

/// Set a content's status through the repository, stamping timestamps the
/// same way the API would.
pub async fn update_content_status(
    pool: &PgPool,
    id: Id,
    status: ContentStatus,
) -> ContentRecord {
    ContentRepo::update_status(pool, id, status)
        .await
        .expect("status update should succeed")
        .expect("content should exist")
}
