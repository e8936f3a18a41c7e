//! Auth Error Types
//!
//! Every variant that reaches a client carries a domain code (`ATHR-002`,
//! `SGR-001`, ...) which is copied into the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::policy::Action;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No token record for the presented bearer token
    #[error("User has not signed in")]
    NotSignedIn,

    /// Token exists but was signed out
    #[error("{msg}", msg = .0.signed_out_message())]
    SignedOut(Action),

    /// Ownership or role check failed
    #[error("{0}")]
    Forbidden(&'static str),

    /// Target user does not exist; the message names the operation
    #[error("{0}")]
    UserNotFound(&'static str),

    #[error("Try any other Username, this Username has already been taken")]
    UserNameTaken,

    #[error("This user has already been registered, try with any other emailId")]
    EmailTaken,

    #[error("This username does not exist")]
    UserNameNotFound,

    #[error("Password failed")]
    PasswordFailed,

    /// Sign-out with an unknown or already signed-out token
    #[error("User is not Signed in")]
    SignOutRestricted,

    /// Malformed user name, email or password
    #[error("{0}")]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Domain error code shown to clients
    pub fn code(&self) -> Option<&'static str> {
        use AuthError::*;
        match self {
            NotSignedIn => Some("ATHR-001"),
            SignedOut(_) => Some("ATHR-002"),
            Forbidden(_) => Some("ATHR-003"),
            UserNotFound(_) => Some("USR-001"),
            UserNameTaken | SignOutRestricted => Some("SGR-001"),
            EmailTaken => Some("SGR-002"),
            UserNameNotFound => Some("ATH-001"),
            PasswordFailed => Some("ATH-002"),
            Validation(_) | Database(_) | Internal(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        use AuthError::*;
        match self {
            NotSignedIn | SignedOut(_) | Forbidden(_) => ErrorKind::Forbidden,
            UserNotFound(_) => ErrorKind::NotFound,
            UserNameTaken | EmailTaken => ErrorKind::Conflict,
            UserNameNotFound | PasswordFailed | SignOutRestricted => ErrorKind::Unauthorized,
            Validation(e) => e.kind(),
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert into the shared error, keeping the domain code
    pub fn into_app_error(self) -> AppError {
        let code = self.code();
        let app_err = match self {
            AuthError::Validation(e) => e,
            // keeps the 503 classification for pool exhaustion
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        };
        match code {
            Some(code) => app_err.with_code(code),
            None => app_err,
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Forbidden(msg) => {
                tracing::warn!(reason = %msg, "Access denied");
            }
            AuthError::PasswordFailed => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(code = ?self.code(), error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind().is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::NotSignedIn.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::SignedOut(Action::CreateQuestion).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::UserNotFound("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::UserNameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::PasswordFailed.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::SignOutRestricted.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_signed_out_message_follows_action() {
        let err = AuthError::SignedOut(Action::GetAllAnswersToQuestion);
        assert_eq!(
            err.to_string(),
            "User is signed out.Sign in first to get the answers"
        );
        assert_eq!(err.code(), Some("ATHR-002"));
    }

    #[test]
    fn test_into_app_error_keeps_code_and_message() {
        let app = AuthError::Forbidden("Only the answer owner can edit the answer").into_app_error();
        assert_eq!(app.code(), Some("ATHR-003"));
        assert_eq!(app.status_code(), 403);
        assert_eq!(app.message(), "Only the answer owner can edit the answer");

        let app = AuthError::SignOutRestricted.into_app_error();
        assert_eq!(app.code(), Some("SGR-001"));
        assert_eq!(app.status_code(), 401);
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let err = AuthError::from(AppError::bad_request("Email cannot be empty"));
        assert!(matches!(err, AuthError::Validation(_)));
        let app = err.into_app_error();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.code(), None);

        let err = AuthError::from(AppError::internal("hashing failed"));
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
