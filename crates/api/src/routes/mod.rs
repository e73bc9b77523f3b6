pub mod contents;
pub mod health;
pub mod sessions;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /status                                    service + database health
///
/// /contents                                  list, create
/// /contents/{username}                       list by owner
/// /contents/{username}/{slug}/parent         parent lookup
/// /contents/{username}/{slug}/thumbnail      PNG social preview
/// /contents/{username}/{slug}/tabcoins       rate (requires auth)
///
/// /users                                     create
/// /users/{username}                          public profile
///
/// /sessions                                  login
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::status::get_status))
        .nest("/contents", contents::router())
        .nest("/users", users::router())
        .nest("/sessions", sessions::router())
}
