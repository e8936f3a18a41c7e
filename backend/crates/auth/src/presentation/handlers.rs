//! HTTP Handlers
//!
//! Each handler opens a unit of work, runs one use case and commits.
//! Returning early with `?` drops the unit of work, which rolls back.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use crate::application::{
    AuthConfig, DeleteUserUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase, UserProfileUseCase,
};
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::{AuthUnitOfWork, TransactionManager, UnitOfWork};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    SessionResponse, SignInRequest, SignUpRequest, UserDetailsResponse, UserStatusResponse,
};
use crate::presentation::extract::BearerToken;

/// Response header carrying the raw token after sign-in
pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("access-token");

#[derive(Clone)]
pub struct AuthAppState<S> {
    pub store: S,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up / Sign In / Sign Out
// ============================================================================

/// POST /user/signup
pub async fn sign_up<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let input = SignUpInput {
        user_name: req.user_name,
        password: req.password,
        email: req.email_address,
        profile: UserProfile {
            first_name: req.first_name,
            last_name: req.last_name,
            country: req.country,
            about_me: req.about_me,
            dob: req.dob,
            contact_number: req.contact_number,
        },
    };

    let mut tx = state.store.begin().await?;
    let output = SignUpUseCase::new(state.config.clone())
        .execute(&mut tx, input)
        .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(UserStatusResponse {
            id: output.user_id.to_string(),
            status: "USER SUCCESSFULLY REGISTERED",
        }),
    ))
}

/// POST /user/signin
pub async fn sign_in<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let input = SignInInput {
        user_name: req.user_name,
        password: req.password,
    };

    let mut tx = state.store.begin().await?;
    let output = SignInUseCase::new(state.config.clone())
        .execute(&mut tx, input)
        .await?;
    tx.commit().await?;

    let token = HeaderValue::from_str(&output.access_token)
        .map_err(|e| AuthError::Internal(format!("Unencodable access token: {e}")))?;

    Ok((
        StatusCode::OK,
        [(ACCESS_TOKEN_HEADER, token)],
        Json(SessionResponse {
            id: output.user_id.to_string(),
            message: "SIGNED IN SUCCESSFULLY",
        }),
    ))
}

/// POST /user/signout
pub async fn sign_out<S>(
    State(state): State<AuthAppState<S>>,
    bearer: BearerToken,
) -> AuthResult<Json<SessionResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let user_id = SignOutUseCase::new()
        .execute(&mut tx, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(SessionResponse {
        id: user_id.to_string(),
        message: "SIGNED OUT SUCCESSFULLY",
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /userprofile/{user_id}
pub async fn user_profile<S>(
    State(state): State<AuthAppState<S>>,
    Path(user_id): Path<String>,
    bearer: BearerToken,
) -> AuthResult<Json<UserDetailsResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let user = UserProfileUseCase::new()
        .execute(&mut tx, &user_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(user.into()))
}

/// DELETE /admin/user/{user_id}
pub async fn delete_user<S>(
    State(state): State<AuthAppState<S>>,
    Path(user_id): Path<String>,
    bearer: BearerToken,
) -> AuthResult<Json<UserStatusResponse>>
where
    S: TransactionManager + Clone + Send + Sync + 'static,
    S::UnitOfWork: AuthUnitOfWork,
{
    let mut tx = state.store.begin().await?;
    let deleted = DeleteUserUseCase::new()
        .execute(&mut tx, &user_id, bearer.as_str())
        .await?;
    tx.commit().await?;

    Ok(Json(UserStatusResponse {
        id: deleted.user_id.to_string(),
        status: "USER SUCCESSFULLY DELETED",
    }))
}
