//! Handlers for the `/sessions` resource (login).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use mural_core::error::{CoreError, ErrorDetails};
use mural_core::types::{Id, Timestamp};
use mural_core::validation::{VALIDATOR_ACTION, VALIDATOR_LOCATION_CODE};
use mural_db::models::session::CreateSession;
use mural_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::verify_password;
use crate::auth::session::{generate_token, session_ttl, set_cookie_value};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Created-session payload. The token doubles as the `session_id` cookie
/// value, which is also set on the response.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Id,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn data_mismatch() -> AppError {
    AppError::Core(CoreError::Unauthorized(ErrorDetails::new(
        "Dados não conferem.",
        "Verifique se os dados enviados estão corretos.",
        "CONTROLLER:SESSIONS:POST_HANDLER:DATA_MISMATCH",
    )))
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

/// POST /api/v1/sessions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSessionBody>,
) -> AppResult<Response> {
    let email = input.email.as_deref().ok_or_else(|| required_field("email"))?;
    let password = input
        .password
        .as_deref()
        .ok_or_else(|| required_field("password"))?;

    // A wrong email and a wrong password answer identically, so the
    // endpoint cannot be used to probe which emails exist.
    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(data_mismatch)?;

    let matches = verify_password(password, &user.password_hash).map_err(|err| {
        AppError::Core(CoreError::Internal(ErrorDetails::new(
            format!("password verification failed: {err}"),
            "",
            "MODEL:AUTHENTICATION:VERIFY_PASSWORD",
        )))
    })?;
    if !matches {
        return Err(data_mismatch());
    }

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token: generate_token(),
            expires_at: Utc::now() + session_ttl(),
        },
    )
    .await?;

    let cookie = set_cookie_value(&session.token);
    let body = SessionResponse {
        id: session.id,
        token: session.token,
        expires_at: session.expires_at,
        created_at: session.created_at,
        updated_at: session.updated_at,
    };

    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(body)).into_response())
}
