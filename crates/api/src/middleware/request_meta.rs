//! Injects the request id into error bodies.
//!
//! `IntoResponse` for `AppError` has no access to request headers, so it
//! leaves `request_id` empty and stashes the [`PublicError`] in the response
//! extensions. This middleware runs inside the request-id layers, reads the
//! `x-request-id` header minted for the request, and re-serializes the body
//! with the id filled in. Success responses pass through untouched.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::error::PublicError;

/// Header set by `SetRequestIdLayer` and echoed by `PropagateRequestIdLayer`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn finalize_error_body(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    let mut response = next.run(request).await;

    let Some(mut public) = response.extensions_mut().remove::<PublicError>() else {
        return response;
    };
    public.request_id = request_id;
    (public.status(), Json(public)).into_response()
}
