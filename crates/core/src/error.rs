//! Typed domain errors.
//!
//! Every failure that can surface to a client carries a user-facing
//! Portuguese `message`/`action` pair plus a machine-readable
//! `error_location_code` identifying the raise site, mirroring the public
//! error contract (`name`, `message`, `action`, `status_code`,
//! `error_location_code`, `key`). The HTTP layer adds `error_id` and
//! `request_id` when serializing.

/// Payload shared by every [`CoreError`] variant.
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    /// User-facing description of what went wrong.
    pub message: String,
    /// User-facing suggestion of what to do about it.
    pub action: String,
    /// Machine-readable raise-site code, e.g.
    /// `CONTROLLER:CONTENT:PARENT:GET_HANDLER:ALREADY_ROOT`.
    pub error_location_code: String,
    /// The input field this error relates to, when there is one.
    pub key: Option<String>,
}

impl ErrorDetails {
    pub fn new(
        message: impl Into<String>,
        action: impl Into<String>,
        error_location_code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            action: action.into(),
            error_location_code: error_location_code.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Domain-level error, classified by the HTTP status it maps to.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    #[error("{}", .0.message)]
    NotFound(ErrorDetails),

    #[error("{}", .0.message)]
    Validation(ErrorDetails),

    #[error("{}", .0.message)]
    Unauthorized(ErrorDetails),

    #[error("{}", .0.message)]
    Forbidden(ErrorDetails),

    #[error("{}", .0.message)]
    UnprocessableEntity(ErrorDetails),

    #[error("{}", .0.message)]
    Internal(ErrorDetails),
}

impl CoreError {
    /// Public error class name, asserted verbatim by API clients.
    pub fn name(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NotFoundError",
            CoreError::Validation(_) => "ValidationError",
            CoreError::Unauthorized(_) => "UnauthorizedError",
            CoreError::Forbidden(_) => "ForbiddenError",
            CoreError::UnprocessableEntity(_) => "UnprocessableEntityError",
            CoreError::Internal(_) => "InternalServerError",
        }
    }

    /// HTTP status code this error class maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::NotFound(_) => 404,
            CoreError::Validation(_) => 400,
            CoreError::Unauthorized(_) => 401,
            CoreError::Forbidden(_) => 403,
            CoreError::UnprocessableEntity(_) => 422,
            CoreError::Internal(_) => 500,
        }
    }

    pub fn details(&self) -> &ErrorDetails {
        match self {
            CoreError::NotFound(d)
            | CoreError::Validation(d)
            | CoreError::Unauthorized(d)
            | CoreError::Forbidden(d)
            | CoreError::UnprocessableEntity(d)
            | CoreError::Internal(d) => d,
        }
    }
}
