//! Pagination metadata exposed through response headers.
//!
//! List endpoints return a plain JSON array; page navigation travels in the
//! `Link` header (`first`, `prev`, `next`, `last` rels) plus
//! `X-Pagination-Total-Rows`. Clients use the `next` rel to prefetch the
//! following page.

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use mural_core::content::ListStrategy;

pub const TOTAL_ROWS_HEADER: &str = "x-pagination-total-rows";

/// Computed page navigation for one listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total_rows: i64,
    pub first_page: u32,
    pub last_page: u32,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
}

impl Pagination {
    pub fn new(current_page: u32, per_page: u32, total_rows: i64) -> Self {
        let last_page = (total_rows.max(0) as u64).div_ceil(u64::from(per_page)).max(1) as u32;
        Self {
            current_page,
            per_page,
            total_rows,
            first_page: 1,
            last_page,
            next_page: (current_page < last_page).then(|| current_page + 1),
            previous_page: current_page.checked_sub(1).filter(|page| *page >= 1),
        }
    }

    /// Build the `Link` header value for this page.
    fn link_header(&self, base_path: &str, strategy: ListStrategy) -> String {
        let url = |page: u32| {
            format!(
                "<{base_path}?strategy={}&page={page}&per_page={}>",
                strategy.as_str(),
                self.per_page
            )
        };

        let mut parts = vec![format!("{}; rel=\"first\"", url(self.first_page))];
        if let Some(previous) = self.previous_page {
            parts.push(format!("{}; rel=\"prev\"", url(previous)));
        }
        if let Some(next) = self.next_page {
            parts.push(format!("{}; rel=\"next\"", url(next)));
        }
        parts.push(format!("{}; rel=\"last\"", url(self.last_page)));
        parts.join(", ")
    }

    /// Set the `Link` and `X-Pagination-Total-Rows` headers on a response.
    pub fn apply_headers(&self, headers: &mut HeaderMap, base_path: &str, strategy: ListStrategy) {
        if let Ok(value) = HeaderValue::from_str(&self.link_header(base_path, strategy)) {
            headers.insert(LINK, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.total_rows.to_string()) {
            headers.insert(HeaderName::from_static(TOTAL_ROWS_HEADER), value);
        }
    }
}
