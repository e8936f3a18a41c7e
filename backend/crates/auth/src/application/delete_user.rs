//! Delete User Use Case
//!
//! Admin only. Removes the account with its tokens, questions and answers.

use kernel::id::UserId;

use crate::application::authorize::AuthorizeUseCase;
use crate::domain::entity::user::User;
use crate::domain::policy::Action;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteUserUseCase {
    authorize: AuthorizeUseCase,
}

impl DeleteUserUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn execute<T>(&self, tx: &mut T, user_id: &str, bearer: &str) -> AuthResult<User>
    where
        T: UserRepository + AccessTokenRepository + Send,
    {
        let admin = self.authorize.execute(tx, bearer, Action::DeleteUser).await?;

        let not_found =
            || AuthError::UserNotFound("User with entered uuid to be deleted does not exist");
        let user_id = UserId::parse_str(user_id).map_err(|_| not_found())?;

        let deleted = tx.delete_user(&user_id).await?.ok_or_else(not_found)?;

        tracing::info!(
            user_id = %deleted.user_id,
            deleted_by = %admin.user_id,
            "User deleted"
        );
        Ok(deleted)
    }
}
