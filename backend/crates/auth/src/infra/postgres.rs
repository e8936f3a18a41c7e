//! PostgreSQL Repository Implementations
//!
//! [`PgStore`] owns the pool; [`PgUnitOfWork`] wraps one `sqlx` transaction
//! and implements every repository trait, so a request's reads and writes
//! commit or roll back together.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{access_token::AccessToken, credentials::Credentials, user::User};
use crate::domain::repository::{
    AccessTokenRepository, CredentialsRepository, TransactionManager, UnitOfWork,
    UserRepository,
};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = "uuid, user_name, role, first_name, last_name, email, \
                            country, about_me, dob, contact_number";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TransactionManager for PgStore {
    type UnitOfWork = PgUnitOfWork;

    async fn begin(&self) -> AuthResult<PgUnitOfWork> {
        let tx = self.pool.begin().await?;
        Ok(PgUnitOfWork { tx })
    }
}

/// One open transaction. Dropping it rolls back.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PgUnitOfWork {
    /// Connection inside the transaction, for repositories in other crates
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}

impl UnitOfWork for PgUnitOfWork {
    async fn commit(self) -> AuthResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUnitOfWork {
    async fn create_user(&mut self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                uuid,
                user_name,
                role,
                first_name,
                last_name,
                email,
                country,
                about_me,
                dob,
                contact_number
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.user_role.code())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(&user.country)
        .bind(&user.about_me)
        .bind(&user.dob)
        .bind(&user.contact_number)
        .execute(self.conn())
        .await?;

        Ok(())
    }

    async fn find_user_by_id(&mut self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE uuid = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_user_by_user_name(
        &mut self,
        user_name: &UserName,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name = $1"
        ))
        .bind(user_name.as_str())
        .fetch_optional(self.conn())
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_user_name(&mut self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(self.conn())
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&mut self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(self.conn())
                .await?;

        Ok(exists)
    }

    async fn find_users_by_role(&mut self, role: UserRole) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(role) = $1 ORDER BY id"
        ))
        .bind(role.code())
        .fetch_all(self.conn())
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn delete_user(&mut self, user_id: &UserId) -> AuthResult<Option<User>> {
        // tokens, credentials, questions and answers go with the FK cascade
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "DELETE FROM users WHERE uuid = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Credentials Repository Implementation
// ============================================================================

impl CredentialsRepository for PgUnitOfWork {
    async fn create_credentials(&mut self, credentials: &Credentials) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_credentials (user_uuid, password_hash, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(credentials.user_id.as_uuid())
        .bind(credentials.password_hash.as_phc_string())
        .bind(credentials.created_at)
        .execute(self.conn())
        .await?;

        Ok(())
    }

    async fn find_credentials(&mut self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT user_uuid, password_hash, created_at FROM user_credentials WHERE user_uuid = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(self.conn())
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }
}

// ============================================================================
// Access Token Repository Implementation
// ============================================================================

impl AccessTokenRepository for PgUnitOfWork {
    async fn create_token(&mut self, token: &AccessToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_auth_tokens (token_digest, user_uuid, login_at, logout_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token_digest[..])
        .bind(token.user_id.as_uuid())
        .bind(token.login_at)
        .bind(token.logout_at)
        .execute(self.conn())
        .await?;

        Ok(())
    }

    async fn find_token(&mut self, token_digest: &[u8; 32]) -> AuthResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT token_digest, user_uuid, login_at, logout_at
            FROM user_auth_tokens
            WHERE token_digest = $1
            FOR SHARE
            "#,
        )
        .bind(&token_digest[..])
        .fetch_optional(self.conn())
        .await?;

        row.map(AccessTokenRow::into_token).transpose()
    }

    async fn sign_out_token(
        &mut self,
        token_digest: &[u8; 32],
        logout_at: DateTime<Utc>,
    ) -> AuthResult<Option<AccessToken>> {
        // a concurrent sign-out blocks on the row lock, then sees logout_at set
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            UPDATE user_auth_tokens
            SET logout_at = $2
            WHERE token_digest = $1 AND logout_at IS NULL
            RETURNING token_digest, user_uuid, login_at, logout_at
            "#,
        )
        .bind(&token_digest[..])
        .bind(logout_at)
        .fetch_optional(self.conn())
        .await?;

        row.map(AccessTokenRow::into_token).transpose()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    uuid: Uuid,
    user_name: String,
    role: String,
    first_name: String,
    last_name: String,
    email: String,
    country: Option<String>,
    about_me: Option<String>,
    dob: Option<String>,
    contact_number: Option<String>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.uuid),
            user_name: UserName::from_db(self.user_name),
            user_role,
            first_name: self.first_name,
            last_name: self.last_name,
            email: Email::from_db(self.email),
            country: self.country,
            about_me: self.about_me,
            dob: self.dob,
            contact_number: self.contact_number,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    user_uuid: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<Credentials> {
        Ok(Credentials {
            user_id: UserId::from_uuid(self.user_uuid),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    token_digest: Vec<u8>,
    user_uuid: Uuid,
    login_at: DateTime<Utc>,
    logout_at: Option<DateTime<Utc>>,
}

impl AccessTokenRow {
    fn into_token(self) -> AuthResult<AccessToken> {
        let token_digest: [u8; 32] = self
            .token_digest
            .try_into()
            .map_err(|_| AuthError::Internal("Invalid token digest length".to_string()))?;

        Ok(AccessToken {
            token_digest,
            user_id: UserId::from_uuid(self.user_uuid),
            login_at: self.login_at,
            logout_at: self.logout_at,
        })
    }
}
