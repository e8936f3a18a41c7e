//! User Profile Use Case

use kernel::id::UserId;

use crate::application::authorize::AuthorizeUseCase;
use crate::domain::entity::user::User;
use crate::domain::policy::Action;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct UserProfileUseCase {
    authorize: AuthorizeUseCase,
}

impl UserProfileUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any signed-in user may read any profile
    pub async fn execute<T>(&self, tx: &mut T, user_id: &str, bearer: &str) -> AuthResult<User>
    where
        T: UserRepository + AccessTokenRepository + Send,
    {
        self.authorize
            .execute(tx, bearer, Action::GetUserProfile)
            .await?;

        let not_found = || AuthError::UserNotFound("User with entered uuid does not exist");
        let user_id = UserId::parse_str(user_id).map_err(|_| not_found())?;

        tx.find_user_by_id(&user_id).await?.ok_or_else(not_found)
    }
}
