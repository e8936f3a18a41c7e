//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email_address: String,
    pub password: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub user_name: String,
    pub password: String,
}

/// `{ id, message }` body shared by sign-in and sign-out
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub message: &'static str,
}

// ============================================================================
// Users
// ============================================================================

/// `{ id, status }` body for account mutations
#[derive(Debug, Clone, Serialize)]
pub struct UserStatusResponse {
    pub id: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

impl From<User> for UserDetailsResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.to_string(),
            user_name: user.user_name.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email.to_string(),
            country: user.country,
            about_me: user.about_me,
            dob: user.dob,
            contact_number: user.contact_number,
        }
    }
}
