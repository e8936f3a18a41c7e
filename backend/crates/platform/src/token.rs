//! Opaque Access Tokens
//!
//! Tokens are random bytes rendered as base64url. Only the SHA-256 digest
//! is stored, so a leaked table cannot be replayed as bearer tokens.

use crate::crypto::{random_bytes, sha256, to_base64_url};

/// Entropy of a freshly issued token
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// Generate a new raw access token
pub fn generate_access_token(len: usize) -> String {
    to_base64_url(&random_bytes(len))
}

/// Storage digest of a raw token
pub fn token_digest(raw: &str) -> [u8; 32] {
    sha256(raw.as_bytes())
}
