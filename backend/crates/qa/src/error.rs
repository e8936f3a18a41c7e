//! Q&A Error Types
//!
//! Token and ownership failures come from `auth` unchanged; this enum adds
//! the question and answer lookups.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type QaResult<T> = Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    /// Authorization, ownership and user lookup failures
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Question lookup failed; the message names the operation
    #[error("{0}")]
    InvalidQuestion(&'static str),

    #[error("Entered answer uuid does not exist")]
    AnswerNotFound,

    #[error("No Answers available for the given question uuid")]
    NoAnswersForQuestion,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl QaError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            QaError::Auth(e) => e.code(),
            QaError::InvalidQuestion(_) => Some("QUES-001"),
            QaError::AnswerNotFound => Some("ANS-001"),
            QaError::NoAnswersForQuestion => Some("OTHR-001"),
            QaError::Database(_) | QaError::Internal(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QaError::Auth(e) => e.kind(),
            QaError::InvalidQuestion(_)
            | QaError::AnswerNotFound
            | QaError::NoAnswersForQuestion => ErrorKind::NotFound,
            QaError::Database(_) | QaError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn into_app_error(self) -> AppError {
        let code = self.code();
        let app_err = match self {
            QaError::Auth(e) => return e.into_app_error(),
            QaError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        };
        match code {
            Some(code) => app_err.with_code(code),
            None => app_err,
        }
    }

    fn log(&self) {
        match self {
            QaError::Database(e) => {
                tracing::error!(error = %e, "Q&A database error");
            }
            QaError::Internal(msg) => {
                tracing::error!(message = %msg, "Q&A internal error");
            }
            QaError::Auth(AuthError::Forbidden(reason)) => {
                tracing::warn!(reason = %reason, "Q&A access denied");
            }
            _ => {
                tracing::debug!(code = ?self.code(), error = %self, "Q&A error");
            }
        }
    }
}

impl IntoResponse for QaError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
