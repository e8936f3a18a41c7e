//! User Name Value Object
//!
//! The login handle. Compared exactly as entered (after trimming), so
//! `Alice` and `alice` are different accounts.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("User name cannot be empty")
                .with_action("Please enter a user name"));
        }

        let len = trimmed.chars().count();
        if len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User name must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, len
            )));
        }

        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request(
                "User name cannot contain whitespace or control characters",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Rebuild from a stored value (already validated on the way in)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
