pub mod contents;
pub mod sessions;
pub mod status;
pub mod users;

use mural_core::error::{CoreError, ErrorDetails};

use crate::error::AppError;

/// Fallback for unmatched routes, so 404s share the public error body.
pub async fn not_found() -> AppError {
    AppError::Core(CoreError::NotFound(ErrorDetails::new(
        "Não foi possível encontrar este recurso no sistema.",
        "Verifique se o caminho (PATH) e o método (METHOD) estão corretos.",
        "CONTROLLER:API:NOT_FOUND_HANDLER",
    )))
}
