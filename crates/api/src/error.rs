//! Application-level error type and its mapping to the public error body.
//!
//! Every error response carries the stable field set clients assert on:
//! `name`, `message`, `action`, `status_code`, `error_id`, `request_id`,
//! `error_location_code`, and optionally `key`. `error_id` is minted here;
//! `request_id` is injected by the `finalize_error_body` middleware, which
//! picks the [`PublicError`] back up from the response extensions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use mural_core::error::CoreError;

/// Message/action pair used for every sanitized internal error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Um erro interno não esperado aconteceu.";
pub const INTERNAL_ERROR_ACTION: &str =
    "Informe ao time de desenvolvimento o valor encontrado no campo 'error_id'.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds infrastructure variants.
/// Implements [`IntoResponse`] to produce the public JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mural_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A thumbnail rasterization error.
    #[error("Thumbnail rendering error: {0}")]
    Render(#[from] mural_thumbnail::RenderError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Serialized public error body.
#[derive(Debug, Clone, Serialize)]
pub struct PublicError {
    pub name: &'static str,
    pub message: String,
    pub action: String,
    pub status_code: u16,
    pub error_id: Uuid,
    pub request_id: Option<Uuid>,
    pub error_location_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl PublicError {
    fn from_core(core: &CoreError) -> Self {
        let details = core.details();
        Self {
            name: core.name(),
            message: details.message.clone(),
            action: details.action.clone(),
            status_code: core.status_code(),
            error_id: Uuid::new_v4(),
            request_id: None,
            error_location_code: details.error_location_code.clone(),
            key: details.key.clone(),
        }
    }

    fn internal(error_location_code: &str) -> Self {
        Self {
            name: "InternalServerError",
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            action: INTERNAL_ERROR_ACTION.to_string(),
            status_code: 500,
            error_id: Uuid::new_v4(),
            request_id: None,
            error_location_code: error_location_code.to_string(),
            key: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let public = match &self {
            // Internal domain errors are sanitized like infrastructure ones.
            AppError::Core(CoreError::Internal(details)) => {
                let public = PublicError::internal(&details.error_location_code);
                tracing::error!(
                    error = %details.message,
                    error_id = %public.error_id,
                    "Internal error"
                );
                public
            }
            AppError::Core(core) => PublicError::from_core(core),

            // Infrastructure errors are sanitized: the details go to the log
            // correlated by error_id, never to the client.
            AppError::Database(err) => {
                let public = PublicError::internal("MODEL:DATABASE:UNEXPECTED_ERROR");
                tracing::error!(error = %err, error_id = %public.error_id, "Database error");
                public
            }
            AppError::Render(err) => {
                let public = PublicError::internal("CONTROLLER:CONTENT:THUMBNAIL:RENDER");
                tracing::error!(error = %err, error_id = %public.error_id, "Thumbnail rendering error");
                public
            }
        };

        let mut response = (public.status(), Json(&public)).into_response();
        response.extensions_mut().insert(public);
        response
    }
}
