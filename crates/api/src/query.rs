//! Shared query parameter types for API handlers.
//!
//! Values arrive as raw strings and are parsed by `mural_core::validation`
//! so that malformed input surfaces as a public `ValidationError` body
//! instead of an extractor rejection.

use serde::Deserialize;

/// Listing parameters (`?strategy=&page=&per_page=`).
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    pub strategy: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}
