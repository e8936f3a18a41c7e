//! Authorization Rules
//!
//! Pure decisions over already-loaded data. Token lookup and entity loading
//! happen in the application layer; the order of checks is fixed there:
//! token present, not signed out, entity exists, ownership or role.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Operation a bearer token is being checked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CreateQuestion,
    AllQuestions,
    EditQuestion,
    DeleteQuestion,
    AllQuestionsForUser,
    CreateAnswer,
    EditAnswer,
    DeleteAnswer,
    GetAllAnswersToQuestion,
    DeleteUser,
    GetUserProfile,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::CreateQuestion,
        Action::AllQuestions,
        Action::EditQuestion,
        Action::DeleteQuestion,
        Action::AllQuestionsForUser,
        Action::CreateAnswer,
        Action::EditAnswer,
        Action::DeleteAnswer,
        Action::GetAllAnswersToQuestion,
        Action::DeleteUser,
        Action::GetUserProfile,
    ];

    /// Client-facing message for a signed-out token
    pub const fn signed_out_message(&self) -> &'static str {
        use Action::*;
        match self {
            CreateQuestion => "User is signed out.Sign in first to post a question",
            AllQuestions => "User is signed out.Sign in first to get all questions",
            EditQuestion => "User is signed out.Sign in first to edit the question",
            DeleteQuestion => "User is signed out.Sign in first to delete a question",
            AllQuestionsForUser => {
                "User is signed out.Sign in first to get all questions posted by a specific user"
            }
            CreateAnswer => "User is signed out.Sign in first to post an answer",
            EditAnswer => "User is signed out.Sign in first to edit an answer",
            DeleteAnswer => "User is signed out.Sign in first to delete an answer",
            GetAllAnswersToQuestion => "User is signed out.Sign in first to get the answers",
            GetUserProfile => "User is signed out.Sign in first to get user details",
            DeleteUser => "User is signed out",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        use Action::*;
        match self {
            CreateQuestion => "create_question",
            AllQuestions => "all_questions",
            EditQuestion => "edit_question",
            DeleteQuestion => "delete_question",
            AllQuestionsForUser => "all_questions_for_user",
            CreateAnswer => "create_answer",
            EditAnswer => "edit_answer",
            DeleteAnswer => "delete_answer",
            GetAllAnswersToQuestion => "get_all_answers_to_question",
            DeleteUser => "delete_user",
            GetUserProfile => "get_user_profile",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity after a successful token check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedUser {
    pub user_id: UserId,
    pub role: UserRole,
}

impl AuthorizedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Role gate for admin-only actions
pub fn check_role(requester: &AuthorizedUser, action: Action) -> AuthResult<()> {
    match action {
        Action::DeleteUser if !requester.is_admin() => Err(AuthError::Forbidden(
            "Unauthorized Access, Entered user is not an admin",
        )),
        _ => Ok(()),
    }
}

/// Ownership gate, evaluated once the target entity is known to exist
///
/// Deleting a question has no admin override; deleting an answer does.
pub fn check_ownership(
    requester: &AuthorizedUser,
    action: Action,
    owner: &UserId,
) -> AuthResult<()> {
    let is_owner = requester.user_id == *owner;
    let (allowed, message) = match action {
        Action::EditQuestion => (is_owner, "Only the question owner can edit the question"),
        Action::DeleteQuestion => (
            is_owner,
            "Only the question owner or admin can delete the question",
        ),
        Action::EditAnswer => (is_owner, "Only the answer owner can edit the answer"),
        Action::DeleteAnswer => (
            is_owner || requester.is_admin(),
            "Only the answer owner or admin can delete the answer",
        ),
        _ => (true, ""),
    };

    if allowed {
        Ok(())
    } else {
        Err(AuthError::Forbidden(message))
    }
}
