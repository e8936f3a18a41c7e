//! In-memory store
//!
//! Same contract as the PostgreSQL store, used by tests and local runs
//! without a database. A unit of work holds the table lock for its whole
//! lifetime and restores a snapshot if dropped before commit.
//!
//! `X` carries tables owned by other crates (questions and answers); they
//! live behind the same lock so one unit of work covers them too.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entity::{access_token::AccessToken, credentials::Credentials, user::User};
use crate::domain::repository::{
    AccessTokenRepository, CredentialsRepository, TransactionManager, UnitOfWork,
    UserRepository,
};
use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};
use crate::error::AuthResult;

/// Removes rows owned by a deleted user from extension tables
pub trait UserCascade {
    fn remove_user(&mut self, user_id: &UserId);
}

impl UserCascade for () {
    fn remove_user(&mut self, _user_id: &UserId) {}
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTables<X> {
    pub users: Vec<User>,
    pub credentials: Vec<Credentials>,
    pub tokens: Vec<AccessToken>,
    pub ext: X,
}

#[derive(Clone, Default)]
pub struct MemoryStore<X = ()> {
    state: Arc<Mutex<MemoryTables<X>>>,
}

impl<X> MemoryStore<X>
where
    X: Clone + Default,
{
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryTables::default())),
        }
    }

    /// Copy of the committed state
    pub async fn snapshot(&self) -> MemoryTables<X> {
        self.state.lock().await.clone()
    }
}

impl<X> TransactionManager for MemoryStore<X>
where
    X: UserCascade + Clone + Default + Send + Sync + 'static,
{
    type UnitOfWork = MemoryUnitOfWork<X>;

    async fn begin(&self) -> AuthResult<MemoryUnitOfWork<X>> {
        let guard = self.state.clone().lock_owned().await;
        let rollback = guard.clone();
        Ok(MemoryUnitOfWork {
            guard,
            rollback: Some(rollback),
        })
    }
}

pub struct MemoryUnitOfWork<X: Clone> {
    guard: OwnedMutexGuard<MemoryTables<X>>,
    rollback: Option<MemoryTables<X>>,
}

impl<X: Clone> MemoryUnitOfWork<X> {
    pub fn tables(&mut self) -> &mut MemoryTables<X> {
        &mut self.guard
    }

    pub fn ext(&mut self) -> &mut X {
        &mut self.guard.ext
    }
}

impl<X: Clone> Drop for MemoryUnitOfWork<X> {
    fn drop(&mut self) {
        if let Some(rollback) = self.rollback.take() {
            *self.guard = rollback;
        }
    }
}

impl<X> UnitOfWork for MemoryUnitOfWork<X>
where
    X: Clone + Send + Sync,
{
    async fn commit(mut self) -> AuthResult<()> {
        self.rollback = None;
        Ok(())
    }
}

impl<X> UserRepository for MemoryUnitOfWork<X>
where
    X: UserCascade + Clone + Send + Sync,
{
    async fn create_user(&mut self, user: &User) -> AuthResult<()> {
        self.guard.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_id(&mut self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.guard.users.iter().find(|u| u.user_id == *user_id).cloned())
    }

    async fn find_user_by_user_name(
        &mut self,
        user_name: &UserName,
    ) -> AuthResult<Option<User>> {
        Ok(self
            .guard
            .users
            .iter()
            .find(|u| u.user_name == *user_name)
            .cloned())
    }

    async fn exists_by_user_name(&mut self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.guard.users.iter().any(|u| u.user_name == *user_name))
    }

    async fn exists_by_email(&mut self, email: &Email) -> AuthResult<bool> {
        Ok(self.guard.users.iter().any(|u| u.email == *email))
    }

    async fn find_users_by_role(&mut self, role: UserRole) -> AuthResult<Vec<User>> {
        Ok(self
            .guard
            .users
            .iter()
            .filter(|u| u.user_role == role)
            .cloned()
            .collect())
    }

    async fn delete_user(&mut self, user_id: &UserId) -> AuthResult<Option<User>> {
        let tables = &mut *self.guard;
        let Some(pos) = tables.users.iter().position(|u| u.user_id == *user_id) else {
            return Ok(None);
        };

        let user = tables.users.remove(pos);
        tables.credentials.retain(|c| c.user_id != *user_id);
        tables.tokens.retain(|t| t.user_id != *user_id);
        tables.ext.remove_user(user_id);
        Ok(Some(user))
    }
}

impl<X> CredentialsRepository for MemoryUnitOfWork<X>
where
    X: Clone + Send + Sync,
{
    async fn create_credentials(&mut self, credentials: &Credentials) -> AuthResult<()> {
        self.guard.credentials.push(credentials.clone());
        Ok(())
    }

    async fn find_credentials(&mut self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        Ok(self
            .guard
            .credentials
            .iter()
            .find(|c| c.user_id == *user_id)
            .cloned())
    }
}

impl<X> AccessTokenRepository for MemoryUnitOfWork<X>
where
    X: Clone + Send + Sync,
{
    async fn create_token(&mut self, token: &AccessToken) -> AuthResult<()> {
        self.guard.tokens.push(token.clone());
        Ok(())
    }

    async fn find_token(&mut self, token_digest: &[u8; 32]) -> AuthResult<Option<AccessToken>> {
        Ok(self
            .guard
            .tokens
            .iter()
            .find(|t| t.token_digest == *token_digest)
            .cloned())
    }

    async fn sign_out_token(
        &mut self,
        token_digest: &[u8; 32],
        logout_at: DateTime<Utc>,
    ) -> AuthResult<Option<AccessToken>> {
        Ok(self
            .guard
            .tokens
            .iter_mut()
            .find(|t| t.token_digest == *token_digest && !t.is_signed_out())
            .map(|t| {
                t.sign_out(logout_at);
                t.clone()
            }))
    }
}
