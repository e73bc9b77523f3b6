//! Opaque session tokens and the `session_id` cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::Duration;
use rand::RngCore;

/// Cookie that carries the session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Sessions are valid for 30 days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Random bytes per token; hex-encoded to 96 characters.
const TOKEN_BYTES: usize = 48;

pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

/// Generate a new opaque session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        token.push_str(&format!("{byte:02x}"));
    }
    token
}

/// Build the `Set-Cookie` value for a freshly created session.
pub fn set_cookie_value(token: &str) -> String {
    let max_age = session_ttl().num_seconds();
    format!("{SESSION_COOKIE}={token}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax")
}

/// Extract the session token from the `Cookie` header, if present.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn tokens_are_96_hex_chars_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 96);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn cookie_is_extracted_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_id=abc123; lang=pt-BR"),
        );
        assert_eq!(extract_session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_cookie(&headers), None);
    }

    #[test]
    fn set_cookie_value_is_http_only() {
        let value = set_cookie_value("abc123");
        assert!(value.starts_with("session_id=abc123; "));
        assert!(value.contains("HttpOnly"));
    }
}
