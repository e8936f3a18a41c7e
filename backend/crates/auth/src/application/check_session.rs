//! Check Session Use Case
//!
//! Resolves a bearer token to its user and sign-in state. A signed-out
//! token still resolves; callers decide how to report it.

use chrono::{DateTime, Utc};
use platform::{bearer::strip_bearer, token::token_digest};

use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user: User,
    pub login_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

impl SessionInfo {
    pub fn is_signed_out(&self) -> bool {
        self.logout_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckSessionUseCase;

impl CheckSessionUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Fails with [`AuthError::NotSignedIn`] when no token record exists
    pub async fn execute<T>(&self, tx: &mut T, bearer: &str) -> AuthResult<SessionInfo>
    where
        T: UserRepository + AccessTokenRepository + Send,
    {
        let raw = strip_bearer(bearer);
        if raw.is_empty() {
            return Err(AuthError::NotSignedIn);
        }

        let token = tx
            .find_token(&token_digest(raw))
            .await?
            .ok_or(AuthError::NotSignedIn)?;

        // the FK cascade removes tokens with their user, so this only trips on
        // a concurrent delete
        let user = tx
            .find_user_by_id(&token.user_id)
            .await?
            .ok_or(AuthError::NotSignedIn)?;

        Ok(SessionInfo {
            user,
            login_at: token.login_at,
            logout_at: token.logout_at,
        })
    }
}
