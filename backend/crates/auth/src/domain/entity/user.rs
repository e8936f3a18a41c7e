//! User Entity
//!
//! Account identity plus the profile fields returned by `/userprofile`.
//! Credential material lives in [`super::credentials::Credentials`].

use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// External id (UUID v4), immutable
    pub user_id: UserId,
    pub user_name: UserName,
    pub user_role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

/// Profile fields supplied at sign-up
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

impl User {
    /// New account with a fresh external id and the `nonadmin` role
    pub fn new(user_name: UserName, email: Email, profile: UserProfile) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            user_role: UserRole::default(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            email,
            country: profile.country,
            about_me: profile.about_me,
            dob: profile.dob,
            contact_number: profile.contact_number,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.user_role = role;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}
