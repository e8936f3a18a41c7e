//! Auth Router

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthUnitOfWork, TransactionManager};
use crate::presentation::handlers::{self, AuthAppState};

/// Account routes over any store (PostgreSQL in production, memory in tests)
pub fn auth_router<S>(store: S, config: AuthConfig) -> Router
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let state = AuthAppState {
        store,
        config: Arc::new(config),
    };

    Router::new()
        .route("/user/signup", post(handlers::sign_up::<S>))
        .route("/user/signin", post(handlers::sign_in::<S>))
        .route("/user/signout", post(handlers::sign_out::<S>))
        .route("/userprofile/{user_id}", get(handlers::user_profile::<S>))
        .route("/admin/user/{user_id}", delete(handlers::delete_user::<S>))
        .with_state(state)
}
