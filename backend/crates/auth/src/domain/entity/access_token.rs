//! Access Token Entity
//!
//! One row per sign-in. The raw bearer token is handed to the client once;
//! only its SHA-256 digest is kept here.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// SHA-256 of the raw token
    pub token_digest: [u8; 32],
    pub user_id: UserId,
    pub login_at: DateTime<Utc>,
    /// Set on sign-out. A token with a logout time rejects every authenticated action.
    pub logout_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(token_digest: [u8; 32], user_id: UserId) -> Self {
        Self {
            token_digest,
            user_id,
            login_at: Utc::now(),
            logout_at: None,
        }
    }

    pub fn is_signed_out(&self) -> bool {
        self.logout_at.is_some()
    }

    pub fn sign_out(&mut self, at: DateTime<Utc>) {
        self.logout_at = Some(at);
    }
}
