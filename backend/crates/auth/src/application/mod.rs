//! Application Layer
//!
//! Use cases. Each takes the request's unit of work by `&mut`; the caller
//! commits.

pub mod authorize;
pub mod check_session;
pub mod config;
pub mod delete_user;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod user_profile;

pub use authorize::AuthorizeUseCase;
pub use check_session::{CheckSessionUseCase, SessionInfo};
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use user_profile::UserProfileUseCase;
