//! Route definitions for the `/contents` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contents;
use crate::state::AppState;

/// Routes mounted at `/contents`.
///
/// ```text
/// GET  /                                  -> list
/// POST /                                  -> create
/// GET  /{username}                        -> list_by_user
/// GET  /{username}/{slug}/parent          -> get_parent
/// GET  /{username}/{slug}/thumbnail       -> get_thumbnail
/// POST /{username}/{slug}/tabcoins        -> rate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contents::list).post(contents::create))
        .route("/{username}", get(contents::list_by_user))
        .route("/{username}/{slug}/parent", get(contents::get_parent))
        .route("/{username}/{slug}/thumbnail", get(contents::get_thumbnail))
        .route("/{username}/{slug}/tabcoins", post(contents::rate))
}
