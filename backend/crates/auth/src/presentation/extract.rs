//! Request extractors

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use platform::bearer::extract_bearer_token;

/// Bearer token from the `authorization` header
///
/// Never rejects: a missing header yields an empty token, which the
/// session check reports as "User has not signed in".
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_bearer_token(&parts.headers).unwrap_or_default()))
    }
}
