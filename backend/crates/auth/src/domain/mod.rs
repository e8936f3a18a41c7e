//! Domain Layer
//!
//! Entities, value objects, authorization rules and repository traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use entity::{access_token::AccessToken, credentials::Credentials, user::User};
pub use policy::{Action, AuthorizedUser};
pub use repository::{
    AccessTokenRepository, AuthUnitOfWork, CredentialsRepository, TransactionManager,
    UnitOfWork, UserRepository,
};
