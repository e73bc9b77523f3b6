//! Authentication: password hashing, session tokens, and the request
//! extractor that resolves the `session_id` cookie to a user.

pub mod password;
pub mod session;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mural_core::error::{CoreError, ErrorDetails};
use mural_db::models::user::User;
use mural_db::repositories::{SessionRepo, UserRepo};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a valid `session_id` cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

fn no_active_session() -> AppError {
    AppError::Core(CoreError::Unauthorized(ErrorDetails::new(
        "Usuário não possui sessão ativa.",
        "Verifique se este usuário está logado e tente novamente.",
        "MODEL:AUTHENTICATION:INJECT_AUTHENTICATED_USER:TOKEN_NOT_FOUND",
    )))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session::extract_session_cookie(&parts.headers).ok_or_else(no_active_session)?;

        let session = SessionRepo::find_valid_by_token(&state.pool, &token)
            .await?
            .ok_or_else(no_active_session)?;

        let user = UserRepo::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(ErrorDetails::new(
                    "Usuário não encontrado.",
                    "Verifique se a sua sessão ainda é válida e faça login novamente.",
                    "MODEL:AUTHENTICATION:INJECT_AUTHENTICATED_USER:USER_NOT_FOUND",
                )))
            })?;

        Ok(AuthUser { user })
    }
}
