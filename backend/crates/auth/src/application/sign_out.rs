//! Sign Out Use Case

use chrono::Utc;
use kernel::id::UserId;
use platform::{bearer::strip_bearer, token::token_digest};

use crate::domain::repository::AccessTokenRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct SignOutUseCase;

impl SignOutUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Stamp the token's logout time and return its owner
    ///
    /// Unknown and already signed-out tokens are both rejected.
    pub async fn execute<T>(&self, tx: &mut T, bearer: &str) -> AuthResult<UserId>
    where
        T: AccessTokenRepository + Send,
    {
        let raw = strip_bearer(bearer);
        let token = tx
            .sign_out_token(&token_digest(raw), Utc::now())
            .await?
            .ok_or(AuthError::SignOutRestricted)?;

        tracing::info!(user_id = %token.user_id, "User signed out");
        Ok(token.user_id)
    }
}
