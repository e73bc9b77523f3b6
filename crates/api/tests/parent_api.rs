//! HTTP-level integration tests for `GET /api/v1/contents/{username}/{slug}/parent`.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Fixtures are created via the repository layer to keep tests focused on
//! HTTP behaviour.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, create_content, create_user, get, ContentFixture};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use mural_db::models::content::ContentStatus;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert the public NotFoundError body, including uuid-v4 `error_id` and
/// `request_id`.
fn assert_not_found_body(json: &Value, message: &str, action: &str, location: &str, key: &str) {
    assert_eq!(json["name"], "NotFoundError");
    assert_eq!(json["message"], message);
    assert_eq!(json["action"], action);
    assert_eq!(json["status_code"], 404);
    assert_eq!(json["error_location_code"], location);
    assert_eq!(json["key"], key);

    let error_id = Uuid::parse_str(json["error_id"].as_str().expect("error_id should be set"))
        .expect("error_id should be a uuid");
    assert_eq!(error_id.get_version_num(), 4);

    let request_id =
        Uuid::parse_str(json["request_id"].as_str().expect("request_id should be set"))
            .expect("request_id should be a uuid");
    assert_eq!(request_id.get_version_num(), 4);
}

fn assert_content_not_found(json: &Value) {
    assert_not_found_body(
        json,
        "O conteúdo informado não foi encontrado no sistema.",
        "Verifique se os dados foram digitados corretamente.",
        "CONTROLLER:CONTENT:PARENT:GET_HANDLER:CONTENT_NOT_FOUND",
        "slug",
    );
}

/// The public content shape has exactly these fields, in any order.
fn assert_public_content_keys(json: &Value) {
    let mut keys: Vec<&str> = json
        .as_object()
        .expect("body should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "body",
            "children_deep_count",
            "created_at",
            "deleted_at",
            "id",
            "owner_id",
            "owner_username",
            "parent_id",
            "published_at",
            "slug",
            "source_url",
            "status",
            "tabcoins",
            "title",
            "updated_at",
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: root content never has a fetchable parent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn root_with_draft_status_is_not_found(pool: PgPool) {
    let user = create_user(&pool).await;
    let root = create_content(
        &pool,
        ContentFixture::root(user.id, "Root content").with_status(ContentStatus::Draft),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", user.username, root.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_content_not_found(&body_json(response).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn root_with_deleted_status_is_not_found(pool: PgPool) {
    let user = create_user(&pool).await;
    let root = create_content(&pool, ContentFixture::root(user.id, "Root content")).await;
    common::update_content_status(&pool, root.id, ContentStatus::Deleted).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", user.username, root.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_content_not_found(&body_json(response).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_root_is_already_root(pool: PgPool) {
    let user = create_user(&pool).await;
    let root = create_content(&pool, ContentFixture::root(user.id, "Root content")).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", user.username, root.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_not_found_body(
        &body_json(response).await,
        "O conteúdo requisitado é um conteúdo raiz.",
        "Busque apenas por conteúdos com \"parent_id\", pois este conteúdo não possui \
         níveis superiores na árvore de conteúdos.",
        "CONTROLLER:CONTENT:PARENT:GET_HANDLER:ALREADY_ROOT",
        "parent_id",
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_slug_is_not_found(pool: PgPool) {
    let user = create_user(&pool).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/no-such-slug/parent", user.username),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_content_not_found(&body_json(response).await);
}

// ---------------------------------------------------------------------------
// Test: non-published children cannot be resolved
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_child_is_not_found(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(&pool, ContentFixture::root(first.id, "Root content title")).await;
    let child = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1")
            .with_status(ContentStatus::Draft),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", second.username, child.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_content_not_found(&body_json(response).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_child_is_not_found(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(&pool, ContentFixture::root(first.id, "Root content title")).await;
    let child = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1"),
    )
    .await;
    common::update_content_status(&pool, child.id, ContentStatus::Deleted).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", second.username, child.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_content_not_found(&body_json(response).await);
}

// ---------------------------------------------------------------------------
// Test: published child returns its parent with aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_child_returns_published_root_parent(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(
        &pool,
        ContentFixture::root(first.id, "Root content title").with_body("Root content body"),
    )
    .await;
    let child = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1"),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", second.username, child.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_public_content_keys(&json);

    assert_eq!(json["id"], serde_json::json!(root.id));
    assert_eq!(json["parent_id"], Value::Null);
    assert_eq!(json["owner_id"], serde_json::json!(first.id));
    assert_eq!(json["slug"], "root-content-title");
    assert_eq!(json["title"], "Root content title");
    assert_eq!(json["body"], "Root content body");
    assert_eq!(json["children_deep_count"], 1);
    assert_eq!(json["status"], "published");
    assert_eq!(json["source_url"], Value::Null);
    assert_eq!(json["published_at"], serde_json::json!(root.published_at));
    assert_eq!(json["created_at"], serde_json::json!(root.created_at));
    assert_eq!(json["updated_at"], serde_json::json!(root.updated_at));
    assert_eq!(json["deleted_at"], Value::Null);
    assert_eq!(json["owner_username"], serde_json::json!(first.username));
    assert_eq!(json["tabcoins"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn three_levels_deep_returns_the_direct_parent(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(&pool, ContentFixture::root(first.id, "Root content title")).await;
    let level1 = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1"),
    )
    .await;
    let level2 = create_content(
        &pool,
        ContentFixture::child(first.id, level1.id, "Child content title Level 2")
            .with_body("Child content body Level 2"),
    )
    .await;
    let level3 = create_content(
        &pool,
        ContentFixture::child(second.id, level2.id, "Child content title Level 3"),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!(
            "/api/v1/contents/{}/{}/parent",
            second.username, level3.slug
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["id"], serde_json::json!(level2.id));
    assert_eq!(json["parent_id"], serde_json::json!(level1.id));
    assert_eq!(json["owner_id"], serde_json::json!(first.id));
    assert_eq!(json["slug"], "child-content-title-level-2");
    assert_eq!(json["title"], "Child content title Level 2");
    assert_eq!(json["body"], "Child content body Level 2");
    assert_eq!(json["children_deep_count"], 1);
    assert_eq!(json["owner_username"], serde_json::json!(first.username));
    assert_eq!(json["tabcoins"], 1);
}

// ---------------------------------------------------------------------------
// Test: non-published parents are masked, not hidden
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_parent_is_masked(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(&pool, ContentFixture::root(first.id, "Root content title")).await;
    let level1 = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1"),
    )
    .await;
    let level2 = create_content(
        &pool,
        ContentFixture::child(first.id, level1.id, "Child content title Level 2")
            .with_status(ContentStatus::Draft),
    )
    .await;
    let level3 = create_content(
        &pool,
        ContentFixture::child(second.id, level2.id, "Child content title Level 3"),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!(
            "/api/v1/contents/{}/{}/parent",
            second.username, level3.slug
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_public_content_keys(&json);

    assert_eq!(json["id"], serde_json::json!(level2.id));
    assert_eq!(json["parent_id"], serde_json::json!(level1.id));
    assert_eq!(json["slug"], "nao-disponivel");
    assert_eq!(json["title"], "[Não disponível]");
    assert_eq!(json["body"], "[Não disponível]");
    assert_eq!(json["children_deep_count"], 0);
    assert_eq!(json["status"], "draft");
    assert_eq!(json["published_at"], Value::Null);
    assert_eq!(json["deleted_at"], Value::Null);
    assert_eq!(json["owner_username"], serde_json::json!(first.username));
    assert_eq!(json["tabcoins"], 0, "never-published rows show the raw sum");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_parent_is_masked_but_keeps_floor(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let root = create_content(&pool, ContentFixture::root(first.id, "Root content title")).await;
    let level1 = create_content(
        &pool,
        ContentFixture::child(second.id, root.id, "Child content title Level 1"),
    )
    .await;
    let level2 = create_content(
        &pool,
        ContentFixture::child(first.id, level1.id, "Child content title Level 2"),
    )
    .await;
    let level2_deleted =
        common::update_content_status(&pool, level2.id, ContentStatus::Deleted).await;
    let level3 = create_content(
        &pool,
        ContentFixture::child(second.id, level2.id, "Child content title Level 3"),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!(
            "/api/v1/contents/{}/{}/parent",
            second.username, level3.slug
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["id"], serde_json::json!(level2.id));
    assert_eq!(json["slug"], "nao-disponivel");
    assert_eq!(json["title"], "[Não disponível]");
    assert_eq!(json["body"], "[Não disponível]");
    assert_eq!(json["children_deep_count"], 0);
    assert_eq!(json["status"], "deleted");
    assert_eq!(
        json["published_at"],
        serde_json::json!(level2_deleted.published_at)
    );
    assert_eq!(
        json["deleted_at"],
        serde_json::json!(level2_deleted.deleted_at)
    );
    assert_eq!(json["tabcoins"], 1, "once-published rows keep the floor of 1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lapsed_sponsored_parent_is_masked(pool: PgPool) {
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;

    let sponsored = create_content(
        &pool,
        ContentFixture::root(first.id, "Sponsored content title")
            .sponsored_until(Utc::now() - Duration::days(1)),
    )
    .await;
    let child = create_content(
        &pool,
        ContentFixture::child(second.id, sponsored.id, "Child of sponsored"),
    )
    .await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/contents/{}/{}/parent", second.username, child.slug),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["id"], serde_json::json!(sponsored.id));
    assert_eq!(json["slug"], "nao-disponivel");
    assert_eq!(json["title"], "[Não disponível]");
    assert_eq!(json["body"], "[Não disponível]");
    assert_eq!(json["children_deep_count"], 0);
    assert_eq!(json["status"], "sponsored");
    assert_eq!(json["tabcoins"], 1);
}
