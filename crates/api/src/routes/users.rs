//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /                -> create
/// GET  /{username}      -> get_by_username
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{username}", get(users::get_by_username))
}
