//! Sign In Use Case
//!
//! Verifies the password and issues a fresh access token. Each sign-in
//! gets its own token; earlier tokens stay valid until signed out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::token::{generate_access_token, token_digest};

use crate::application::config::AuthConfig;
use crate::domain::entity::access_token::AccessToken;
use crate::domain::repository::{AccessTokenRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

pub struct SignInOutput {
    pub user_id: UserId,
    /// Raw bearer token; never stored
    pub access_token: String,
    pub login_at: DateTime<Utc>,
}

pub struct SignInUseCase {
    config: Arc<AuthConfig>,
}

impl SignInUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub async fn execute<T>(&self, tx: &mut T, input: SignInInput) -> AuthResult<SignInOutput>
    where
        T: UserRepository + CredentialsRepository + AccessTokenRepository + Send,
    {
        // a name that could never have been registered cannot exist
        let user_name = UserName::new(&input.user_name).map_err(|_| AuthError::UserNameNotFound)?;

        let user = tx
            .find_user_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::UserNameNotFound)?;

        let credentials = tx
            .find_credentials(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        let raw_password = RawPassword::new(input.password).map_err(|_| AuthError::PasswordFailed)?;
        if !credentials
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::PasswordFailed);
        }

        let access_token = generate_access_token(self.config.access_token_bytes);
        let token = AccessToken::new(token_digest(&access_token), user.user_id);
        tx.create_token(&token).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            access_token,
            login_at: token.login_at,
        })
    }
}
