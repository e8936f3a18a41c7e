//! Repository Traits
//!
//! Every method takes `&mut self` on a unit of work, so all reads and writes
//! of one request share a single transaction. Absence is `None`, never an
//! error.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{access_token::AccessToken, credentials::Credentials, user::User};
use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create_user(&mut self, user: &User) -> AuthResult<()>;

    async fn find_user_by_id(&mut self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_user_name(&mut self, user_name: &UserName)
    -> AuthResult<Option<User>>;

    async fn exists_by_user_name(&mut self, user_name: &UserName) -> AuthResult<bool>;

    async fn exists_by_email(&mut self, email: &Email) -> AuthResult<bool>;

    async fn find_users_by_role(&mut self, role: UserRole) -> AuthResult<Vec<User>>;

    /// Remove a user together with everything they own
    async fn delete_user(&mut self, user_id: &UserId) -> AuthResult<Option<User>>;
}

#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    async fn create_credentials(&mut self, credentials: &Credentials) -> AuthResult<()>;

    async fn find_credentials(&mut self, user_id: &UserId) -> AuthResult<Option<Credentials>>;
}

#[trait_variant::make(AccessTokenRepository: Send)]
pub trait LocalAccessTokenRepository {
    async fn create_token(&mut self, token: &AccessToken) -> AuthResult<()>;

    /// Looks up a token and keeps it from being signed out by another unit
    /// of work until this one ends
    async fn find_token(&mut self, token_digest: &[u8; 32]) -> AuthResult<Option<AccessToken>>;

    /// Stamp the logout time of a token that is still signed in
    ///
    /// `None` when the token is unknown or already signed out. Only one of
    /// several concurrent sign-outs of the same token gets `Some`.
    async fn sign_out_token(
        &mut self,
        token_digest: &[u8; 32],
        logout_at: DateTime<Utc>,
    ) -> AuthResult<Option<AccessToken>>;
}

/// Transaction scope for one request
///
/// Dropping without [`UnitOfWork::commit`] discards every change.
#[trait_variant::make(UnitOfWork: Send)]
pub trait LocalUnitOfWork {
    async fn commit(self) -> AuthResult<()>;
}

/// Opens units of work
#[trait_variant::make(TransactionManager: Send)]
pub trait LocalTransactionManager {
    type UnitOfWork: UnitOfWork + Send;

    async fn begin(&self) -> AuthResult<Self::UnitOfWork>;
}

/// Everything the account use cases need inside one transaction
pub trait AuthUnitOfWork:
    UserRepository + CredentialsRepository + AccessTokenRepository + UnitOfWork
{
}

impl<T> AuthUnitOfWork for T where
    T: UserRepository + CredentialsRepository + AccessTokenRepository + UnitOfWork
{
}
