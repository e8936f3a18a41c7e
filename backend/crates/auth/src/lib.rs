//! Auth (Accounts and Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, authorization rules, repository traits
//! - `application/` - Use cases (sign-up/in/out, session check, authorize, profile, admin delete)
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Opaque bearer tokens; only the SHA-256 digest is stored
//! - A signed-out token is kept (with its logout time) and rejected with an
//!   action-specific message

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::AuthConfig;
pub use domain::policy::{Action, AuthorizedUser};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryStore, postgres::PgStore};
pub use presentation::router::auth_router;

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
