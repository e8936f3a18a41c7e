//! Credentials Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

/// Password hash for one user, kept apart from the profile row
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: UserId,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl Credentials {
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        Self {
            user_id,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
