//! Handlers for the `/contents` resource.

use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mural_core::content::display_tabcoins;
use mural_core::error::{CoreError, ErrorDetails};
use mural_core::validation::{
    parse_page, parse_per_page, parse_strategy, validate_body, validate_slug, validate_source_url,
    validate_title, validate_username, VALIDATOR_ACTION, VALIDATOR_LOCATION_CODE,
};
use mural_core::slug::slugify;
use mural_core::types::{Id, Timestamp};
use mural_db::models::content::{
    ContentDetail, ContentPublic, ContentRecord, ContentStatus, CreateContent,
};
use mural_db::repositories::{ContentRepo, ListContentsFilter, RateError, RatingRepo, UserRepo};
use mural_thumbnail::{parse_card, render_template, ContentCard};

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::pagination::Pagination;
use crate::query::ListQueryParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/v1/contents/{username}/{slug}/parent
// ---------------------------------------------------------------------------

fn parent_content_not_found() -> AppError {
    AppError::Core(CoreError::NotFound(
        ErrorDetails::new(
            "O conteúdo informado não foi encontrado no sistema.",
            "Verifique se os dados foram digitados corretamente.",
            "CONTROLLER:CONTENT:PARENT:GET_HANDLER:CONTENT_NOT_FOUND",
        )
        .with_key("slug"),
    ))
}

fn already_root() -> AppError {
    AppError::Core(CoreError::NotFound(
        ErrorDetails::new(
            "O conteúdo requisitado é um conteúdo raiz.",
            "Busque apenas por conteúdos com \"parent_id\", pois este conteúdo não possui \
             níveis superiores na árvore de conteúdos.",
            "CONTROLLER:CONTENT:PARENT:GET_HANDLER:ALREADY_ROOT",
        )
        .with_key("parent_id"),
    ))
}

/// Resolve the published child by username + slug, then return its parent.
///
/// The parent is returned with masking applied based on its own visibility:
/// a draft/deleted (or lapsed sponsored) parent keeps truthful ids, status,
/// and timestamps, but has title, body, slug, and the descendant count
/// replaced by placeholders.
pub async fn get_parent(
    State(state): State<AppState>,
    Path((username, slug)): Path<(String, String)>,
) -> AppResult<Json<ContentPublic>> {
    validate_username(&username)?;
    validate_slug(&slug)?;

    let child = ContentRepo::find_published_by_owner_and_slug(&state.pool, &username, &slug)
        .await?
        .ok_or_else(parent_content_not_found)?;

    let parent_id = child.parent_id.ok_or_else(already_root)?;

    let parent = ContentRepo::find_by_id(&state.pool, parent_id)
        .await?
        .ok_or_else(parent_content_not_found)?;

    Ok(Json(parent.into_public(Utc::now())))
}

// ---------------------------------------------------------------------------
// GET /api/v1/contents/{username}/{slug}/thumbnail
// ---------------------------------------------------------------------------

fn thumbnail_not_found() -> AppError {
    AppError::Core(CoreError::NotFound(
        ErrorDetails::new(
            "Este conteúdo não está disponível.",
            "Verifique se o \"slug\" está digitado corretamente ou considere o fato do \
             conteúdo ter sido despublicado.",
            "CONTROLLER:CONTENT:THUMBNAIL:GET_HANDLER:SLUG_NOT_FOUND",
        )
        .with_key("slug"),
    ))
}

/// Render the published content as a 1280-wide PNG social preview.
pub async fn get_thumbnail(
    State(state): State<AppState>,
    Path((username, slug)): Path<(String, String)>,
) -> AppResult<Response> {
    validate_username(&username)?;
    validate_slug(&slug)?;

    let content = ContentRepo::find_published_by_owner_and_slug(&state.pool, &username, &slug)
        .await?
        .ok_or_else(thumbnail_not_found)?;

    let card = ContentCard {
        title: content.title.clone(),
        body: content.body.clone(),
        owner_username: content.owner_username.clone(),
        published_at: content.published_at,
        tabcoins: content.tabcoins(),
        comments: content.children_deep_count,
    };
    let svg = render_template(&parse_card(&card));

    // Rasterization is CPU-bound; keep it off the async workers.
    let renderer = state.renderer.clone();
    let png = tokio::task::spawn_blocking(move || renderer.render_png(&svg))
        .await
        .map_err(|err| {
            AppError::Core(CoreError::Internal(ErrorDetails::new(
                format!("thumbnail render task failed: {err}"),
                "",
                "CONTROLLER:CONTENT:THUMBNAIL:GET_HANDLER:RENDER_TASK",
            )))
        })??;

    Ok((
        [
            (CONTENT_TYPE, "image/png"),
            (CACHE_CONTROL, "s-maxage=60, stale-while-revalidate"),
        ],
        png,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// GET /api/v1/contents and GET /api/v1/contents/{username}
// ---------------------------------------------------------------------------

/// Paginated listing of published root contents.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> AppResult<Response> {
    list_contents(&state, None, &params, "/api/v1/contents").await
}

/// Paginated listing of one user's published root contents.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<ListQueryParams>,
) -> AppResult<Response> {
    validate_username(&username)?;

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(
                ErrorDetails::new(
                    "O \"username\" informado não foi encontrado no sistema.",
                    "Verifique se o \"username\" está digitado corretamente.",
                    "CONTROLLER:CONTENT:LIST:GET_HANDLER:USERNAME_NOT_FOUND",
                )
                .with_key("username"),
            ))
        })?;

    let base_path = format!("/api/v1/contents/{}", user.username);
    list_contents(&state, Some(user.username), &params, &base_path).await
}

async fn list_contents(
    state: &AppState,
    owner_username: Option<String>,
    params: &ListQueryParams,
    base_path: &str,
) -> AppResult<Response> {
    let strategy = parse_strategy(params.strategy.as_deref())?;
    let page = parse_page(params.page.as_deref())?;
    let per_page = parse_per_page(params.per_page.as_deref())?;

    let filter = ListContentsFilter {
        owner_username,
        strategy,
        page,
        per_page,
    };
    let rows = ContentRepo::list_published(&state.pool, &filter).await?;
    let total_rows = ContentRepo::count_published(&state.pool, &filter).await?;

    let now = Utc::now();
    let body: Vec<ContentPublic> = rows.into_iter().map(|row| row.into_public(now)).collect();

    let pagination = Pagination::new(page, per_page, total_rows);
    let mut response = Json(body).into_response();
    pagination.apply_headers(response.headers_mut(), base_path, strategy);
    Ok(response)
}

// ---------------------------------------------------------------------------
// POST /api/v1/contents
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateContentBody {
    pub parent_id: Option<Id>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub source_url: Option<String>,
}

fn required_field(key: &str) -> AppError {
    AppError::Core(CoreError::Validation(
        ErrorDetails::new(
            format!("\"{key}\" é um campo obrigatório."),
            VALIDATOR_ACTION,
            VALIDATOR_LOCATION_CODE,
        )
        .with_key(key),
    ))
}

fn parse_create_status(raw: Option<&str>) -> Result<ContentStatus, AppError> {
    match raw {
        None | Some("draft") => Ok(ContentStatus::Draft),
        Some("published") => Ok(ContentStatus::Published),
        Some(_) => Err(AppError::Core(CoreError::Validation(
            ErrorDetails::new(
                "\"status\" deve possuir um dos seguintes valores: \"draft\", \"published\".",
                VALIDATOR_ACTION,
                VALIDATOR_LOCATION_CODE,
            )
            .with_key("status"),
        ))),
    }
}

fn duplicate_content() -> AppError {
    AppError::Core(CoreError::Validation(
        ErrorDetails::new(
            "O conteúdo enviado parece ser duplicado.",
            "Utilize um \"title\" ou \"slug\" diferente.",
            "MODEL:CONTENT:CHECK_FOR_CONTENT_UNIQUENESS:ALREADY_EXISTS",
        )
        .with_key("slug"),
    ))
}

/// Publish new content (root post or child comment) owned by the
/// authenticated user.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateContentBody>,
) -> AppResult<(StatusCode, Json<ContentDetail>)> {
    let body = input.body.as_deref().ok_or_else(|| required_field("body"))?;
    validate_body(body)?;

    let status = parse_create_status(input.status.as_deref())?;

    if input.parent_id.is_none() && input.title.is_none() {
        return Err(required_field("title"));
    }
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(source_url) = &input.source_url {
        validate_source_url(source_url)?;
    }

    if let Some(parent_id) = input.parent_id {
        let parent = ContentRepo::find_by_id(&state.pool, parent_id).await?;
        if parent.is_none() {
            return Err(AppError::Core(CoreError::UnprocessableEntity(
                ErrorDetails::new(
                    "Você está tentando criar ou atualizar um conteúdo filho para um \
                     conteúdo pai que não existe.",
                    "Utilize um \"parent_id\" que aponte para um conteúdo que existe.",
                    "CONTROLLER:CONTENT:POST_HANDLER:PARENT_NOT_FOUND",
                )
                .with_key("parent_id"),
            )));
        }
    }

    let slug = match (&input.slug, &input.title) {
        (Some(slug), _) => {
            validate_slug(slug)?;
            slug.clone()
        }
        (None, Some(title)) => slugify(title),
        // Untitled children fall back to a random slug.
        (None, None) => Uuid::new_v4().simple().to_string()[..12].to_string(),
    };

    let created = ContentRepo::create(
        &state.pool,
        &CreateContent {
            owner_id: auth.user.id,
            parent_id: input.parent_id,
            slug,
            title: input.title,
            body: body.to_string(),
            status,
            source_url: input.source_url,
            deactivate_at: None,
        },
    )
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_contents_owner_id_slug") =>
        {
            duplicate_content()
        }
        _ => AppError::Database(err),
    })?;

    Ok((StatusCode::CREATED, Json(into_detail(created, Utc::now()))))
}

fn into_detail(record: ContentRecord, now: Timestamp) -> ContentDetail {
    let tabcoins_credit = record.tabcoins_credit;
    let tabcoins_debit = record.tabcoins_debit;
    ContentDetail {
        content: record.into_public(now),
        tabcoins_credit,
        tabcoins_debit,
    }
}

// ---------------------------------------------------------------------------
// POST /api/v1/contents/{username}/{slug}/tabcoins
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RateBody {
    pub transaction_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub tabcoins: i64,
    pub tabcoins_credit: i64,
    pub tabcoins_debit: i64,
}

/// Spend tabcoins to rate someone else's published content up or down.
pub async fn rate(
    State(state): State<AppState>,
    Path((username, slug)): Path<(String, String)>,
    auth: AuthUser,
    Json(input): Json<RateBody>,
) -> AppResult<Json<RatingResponse>> {
    validate_username(&username)?;
    validate_slug(&slug)?;

    let amount: i32 = match input.transaction_type.as_deref() {
        Some("credit") => 1,
        Some("debit") => -1,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                ErrorDetails::new(
                    "\"transaction_type\" deve possuir um dos seguintes valores: \
                     \"credit\", \"debit\".",
                    VALIDATOR_ACTION,
                    VALIDATOR_LOCATION_CODE,
                )
                .with_key("transaction_type"),
            )))
        }
    };

    let content = ContentRepo::find_published_by_owner_and_slug(&state.pool, &username, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(
                ErrorDetails::new(
                    "O conteúdo informado não foi encontrado no sistema.",
                    "Verifique se o \"slug\" está digitado corretamente.",
                    "CONTROLLER:CONTENT:TABCOINS:POST_HANDLER:SLUG_NOT_FOUND",
                )
                .with_key("slug"),
            ))
        })?;

    if content.owner_id == auth.user.id {
        return Err(AppError::Core(CoreError::Validation(ErrorDetails::new(
            "Você não pode realizar esta operação em conteúdos de sua própria autoria.",
            "Realize esta operação em conteúdos de outros usuários.",
            "CONTROLLER:CONTENT:TABCOINS:POST_HANDLER:OWN_CONTENT",
        ))));
    }

    let balances = RatingRepo::rate(
        &state.pool,
        content.id,
        content.owner_id,
        auth.user.id,
        amount,
    )
    .await
    .map_err(|err| match err {
        RateError::InsufficientBalance => {
            AppError::Core(CoreError::UnprocessableEntity(ErrorDetails::new(
                "Não foi possível utilizar TabCoins para esta operação.",
                "Você precisa de pelo menos 2 TabCoins para realizar esta operação.",
                "CONTROLLER:CONTENT:TABCOINS:POST_HANDLER:NOT_ENOUGH_TABCOINS",
            )))
        }
        RateError::Database(err) => AppError::Database(err),
    })?;

    Ok(Json(RatingResponse {
        tabcoins: display_tabcoins(
            balances.tabcoins_credit,
            balances.tabcoins_debit,
            content.published_at,
        ),
        tabcoins_credit: balances.tabcoins_credit,
        tabcoins_debit: balances.tabcoins_debit,
    }))
}
