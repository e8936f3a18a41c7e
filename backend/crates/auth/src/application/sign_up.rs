//! Sign Up Use Case
//!
//! Creates a `nonadmin` account with its password credentials.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    credentials::Credentials,
    user::{User, UserProfile},
};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    pub email: String,
    pub profile: UserProfile,
}

#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

pub struct SignUpUseCase {
    config: Arc<AuthConfig>,
}

impl SignUpUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub async fn execute<T>(&self, tx: &mut T, input: SignUpInput) -> AuthResult<SignUpOutput>
    where
        T: UserRepository + CredentialsRepository + Send,
    {
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(&input.email)?;

        if tx.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }
        if tx.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(user_name, email, input.profile);
        let credentials = Credentials::new(user.user_id, password_hash);

        tx.create_user(&user).await?;
        tx.create_credentials(&credentials).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}
