//! Bearer token extraction
//!
//! Clients send `authorization: Bearer <token>`. Some clients omit the
//! scheme, so a bare token is accepted as well.

use http::{HeaderMap, header};

const BEARER_SCHEME: &str = "bearer";

/// Strip an optional `Bearer ` scheme prefix (scheme is case-insensitive)
pub fn strip_bearer(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest.trim(),
        _ => trimmed,
    }
}

/// Extract the token from the `Authorization` header
///
/// Returns `None` when the header is missing, not valid ASCII, or empty.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = strip_bearer(value);
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc123"), "abc123");
        assert_eq!(strip_bearer("bearer   abc123 "), "abc123");
        assert_eq!(strip_bearer("abc123"), "abc123");
        assert_eq!(strip_bearer("Basic abc123"), "Basic abc123");
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_bearer_token(&headers), Some("tok".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
