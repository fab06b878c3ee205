//! API utilities for talking to the remote loyalty service.

/// Base URL of the remote API. All client-collection endpoints live under
/// `{API_BASE}/{token}/...`.
pub const API_BASE: &str = "https://api.teyca.ru/v1";

/// Dedicated authentication endpoint (outside the token-scoped tree).
pub const AUTH_URL: &str = "https://api.teyca.ru/test-auth-only";

/// Build a full API URL from a path starting with `/`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}
