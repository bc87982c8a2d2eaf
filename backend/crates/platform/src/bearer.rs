//! Bearer credential extraction
//!
//! Reads the access token from the `Authorization` header.

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "bearer ";

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is missing, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    if value.len() < BEARER_PREFIX.len()
        || !value[..BEARER_PREFIX.len()].eq_ignore_ascii_case(BEARER_PREFIX)
    {
        return None;
    }

    let token = value[BEARER_PREFIX.len()..].trim();
    (!token.is_empty()).then_some(token)
}
