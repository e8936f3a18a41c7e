//! Authorize Use Case
//!
//! Token checks shared by every authenticated operation: token known,
//! not signed out, admin role for admin-only actions. Ownership is checked
//! later by the caller, once the target entity is loaded.

use crate::application::check_session::CheckSessionUseCase;
use crate::domain::policy::{Action, AuthorizedUser, check_role};
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizeUseCase {
    check_session: CheckSessionUseCase,
}

impl AuthorizeUseCase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn execute<T>(
        &self,
        tx: &mut T,
        bearer: &str,
        action: Action,
    ) -> AuthResult<AuthorizedUser>
    where
        T: UserRepository + AccessTokenRepository + Send,
    {
        let session = self.check_session.execute(tx, bearer).await?;

        if session.is_signed_out() {
            tracing::debug!(
                user_id = %session.user.user_id,
                action = %action,
                "Signed-out token presented"
            );
            return Err(AuthError::SignedOut(action));
        }

        let requester = AuthorizedUser {
            user_id: session.user.user_id,
            role: session.user.user_role,
        };
        check_role(&requester, action)?;

        Ok(requester)
    }
}
