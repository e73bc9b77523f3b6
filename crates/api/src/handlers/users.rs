//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mural_core::error::{CoreError, ErrorDetails};
use mural_core::validation::{validate_email, validate_password, validate_username};
use mural_db::models::user::{CreateUser, UserPublic};
use mural_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn required_field(key: &str) -> AppError {
    AppError::Core(CoreError::Validation(
        ErrorDetails::new(
            format!("\"{key}\" é um campo obrigatório."),
            mural_core::validation::VALIDATOR_ACTION,
            mural_core::validation::VALIDATOR_LOCATION_CODE,
        )
        .with_key(key),
    ))
}

fn taken(key: &str, message: &str) -> AppError {
    AppError::Core(CoreError::Validation(
        ErrorDetails::new(
            message,
            format!("Utilize um \"{key}\" diferente."),
            "MODEL:USER:CHECK_FOR_UNIQUENESS:ALREADY_EXISTS",
        )
        .with_key(key),
    ))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserBody>,
) -> AppResult<(StatusCode, Json<UserPublic>)> {
    let username = input
        .username
        .as_deref()
        .ok_or_else(|| required_field("username"))?;
    let email = input.email.as_deref().ok_or_else(|| required_field("email"))?;
    let password = input
        .password
        .as_deref()
        .ok_or_else(|| required_field("password"))?;

    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;

    let password_hash = hash_password(password).map_err(|err| {
        AppError::Core(CoreError::Internal(ErrorDetails::new(
            format!("password hashing failed: {err}"),
            "",
            "MODEL:USER:HASH_PASSWORD",
        )))
    })?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            match db_err.constraint() {
                Some("uq_users_username") => {
                    taken("username", "O \"username\" informado já está sendo usado.")
                }
                Some("uq_users_email") => {
                    taken("email", "O \"email\" informado já está sendo usado.")
                }
                _ => AppError::Database(err),
            }
        }
        _ => AppError::Database(err),
    })?;

    Ok((StatusCode::CREATED, Json(user.into_public())))
}

/// GET /api/v1/users/{username}
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<UserPublic>> {
    validate_username(&username)?;

    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound(
                ErrorDetails::new(
                    "O \"username\" informado não foi encontrado no sistema.",
                    "Verifique se o \"username\" está digitado corretamente.",
                    "CONTROLLER:USERS:USERNAME:GET_HANDLER:USERNAME_NOT_FOUND",
                )
                .with_key("username"),
            ))
        })?;

    Ok(Json(user.into_public()))
}
