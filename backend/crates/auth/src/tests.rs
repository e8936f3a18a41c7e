//! Use-case scenarios against the in-memory store

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::{
    AuthConfig, AuthorizeUseCase, CheckSessionUseCase, DeleteUserUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, UserProfileUseCase,
};
use crate::domain::entity::user::UserProfile;
use crate::domain::policy::Action;
use crate::domain::repository::{
    AccessTokenRepository, TransactionManager, UnitOfWork, UserRepository,
};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::infra::memory::MemoryStore;

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::with_pepper(b"test-pepper".to_vec()))
}

fn sign_up_input(user_name: &str) -> SignUpInput {
    SignUpInput {
        user_name: user_name.to_string(),
        password: "s3cret!".to_string(),
        email: format!("{user_name}@example.com"),
        profile: UserProfile {
            first_name: "Test".to_string(),
            last_name: user_name.to_string(),
            ..Default::default()
        },
    }
}

async fn register(store: &MemoryStore, user_name: &str) -> UserId {
    let mut tx = store.begin().await.unwrap();
    let out = SignUpUseCase::new(config())
        .execute(&mut tx, sign_up_input(user_name))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    out.user_id
}

async fn sign_in(store: &MemoryStore, user_name: &str) -> String {
    let mut tx = store.begin().await.unwrap();
    let out = SignInUseCase::new(config())
        .execute(
            &mut tx,
            SignInInput {
                user_name: user_name.to_string(),
                password: "s3cret!".to_string(),
            },
        )
        .await
        .unwrap();
    tx.commit().await.unwrap();
    out.access_token
}

async fn promote(store: &MemoryStore, user_id: UserId) {
    let mut tx = store.begin().await.unwrap();
    for user in tx.tables().users.iter_mut().filter(|u| u.user_id == user_id) {
        user.user_role = UserRole::Admin;
    }
    tx.commit().await.unwrap();
}

async fn sign_out(store: &MemoryStore, token: &str) -> Result<UserId, AuthError> {
    let mut tx = store.begin().await.unwrap();
    let result = SignOutUseCase::new().execute(&mut tx, token).await;
    tx.commit().await.unwrap();
    result
}

async fn authorize(store: &MemoryStore, token: &str, action: Action) -> Result<UserId, AuthError> {
    let mut tx = store.begin().await.unwrap();
    AuthorizeUseCase::new()
        .execute(&mut tx, token, action)
        .await
        .map(|u| u.user_id)
}

// ============================================================================
// Sign up / sign in
// ============================================================================

#[tokio::test]
async fn test_sign_up_creates_nonadmin_user() {
    let store = MemoryStore::new();
    let user_id = register(&store, "alice").await;

    let tables = store.snapshot().await;
    assert_eq!(tables.users.len(), 1);
    assert_eq!(tables.users[0].user_id, user_id);
    assert_eq!(tables.users[0].user_role, UserRole::NonAdmin);
    assert_eq!(tables.credentials.len(), 1);
}

#[tokio::test]
async fn test_sign_up_conflicts() {
    let store = MemoryStore::new();
    register(&store, "alice").await;

    let mut tx = store.begin().await.unwrap();
    let err = SignUpUseCase::new(config())
        .execute(&mut tx, sign_up_input("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNameTaken));
    assert_eq!(err.code(), Some("SGR-001"));

    let mut input = sign_up_input("bob");
    input.email = "ALICE@example.com".to_string();
    let err = SignUpUseCase::new(config())
        .execute(&mut tx, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(
        err.to_string(),
        "This user has already been registered, try with any other emailId"
    );
}

#[tokio::test]
async fn test_sign_in_failures() {
    let store = MemoryStore::new();
    register(&store, "alice").await;

    let mut tx = store.begin().await.unwrap();
    let use_case = SignInUseCase::new(config());

    let err = use_case
        .execute(
            &mut tx,
            SignInInput {
                user_name: "nobody".to_string(),
                password: "s3cret!".to_string(),
            },
        )
        .await
        .err().expect("sign-in should fail");
    assert_eq!(err.code(), Some("ATH-001"));

    let err = use_case
        .execute(
            &mut tx,
            SignInInput {
                user_name: "alice".to_string(),
                password: "wrong".to_string(),
            },
        )
        .await
        .err().expect("sign-in should fail");
    assert!(matches!(err, AuthError::PasswordFailed));
    assert_eq!(err.code(), Some("ATH-002"));
}

#[tokio::test]
async fn test_sign_in_stores_only_digest() {
    let store = MemoryStore::new();
    register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;

    let tables = store.snapshot().await;
    assert_eq!(tables.tokens.len(), 1);
    assert_eq!(
        tables.tokens[0].token_digest,
        platform::token::token_digest(&token)
    );
    assert!(tables.tokens[0].logout_at.is_none());
}

// ============================================================================
// Session / authorization
// ============================================================================

#[tokio::test]
async fn test_check_session_accepts_bearer_prefix() {
    let store = MemoryStore::new();
    let user_id = register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;

    let mut tx = store.begin().await.unwrap();
    let session = CheckSessionUseCase::new()
        .execute(&mut tx, &format!("Bearer {token}"))
        .await
        .unwrap();
    assert_eq!(session.user.user_id, user_id);
    assert!(!session.is_signed_out());
}

#[tokio::test]
async fn test_absent_token_is_not_signed_in_for_every_action() {
    let store = MemoryStore::new();
    register(&store, "alice").await;

    for action in Action::ALL {
        for token in ["", "Bearer unknown-token"] {
            let err = authorize(&store, token, action).await.unwrap_err();
            assert!(matches!(err, AuthError::NotSignedIn), "{action}");
            assert_eq!(err.to_string(), "User has not signed in");
            assert_eq!(err.code(), Some("ATHR-001"));
        }
    }
}

#[tokio::test]
async fn test_signed_out_token_rejected_with_action_message() {
    let store = MemoryStore::new();
    register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;
    sign_out(&store, &token).await.unwrap();

    for action in Action::ALL {
        let err = authorize(&store, &token, action).await.unwrap_err();
        assert_eq!(err.code(), Some("ATHR-002"));
        assert_eq!(err.to_string(), action.signed_out_message());
    }

    // the session authority itself still resolves the token
    let mut tx = store.begin().await.unwrap();
    let session = CheckSessionUseCase::new()
        .execute(&mut tx, &token)
        .await
        .unwrap();
    assert!(session.is_signed_out());
}

#[tokio::test]
async fn test_sign_out_twice_is_rejected() {
    let store = MemoryStore::new();
    let user_id = register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;

    assert_eq!(sign_out(&store, &token).await.unwrap(), user_id);

    let err = sign_out(&store, &token).await.unwrap_err();
    assert!(matches!(err, AuthError::SignOutRestricted));
    assert_eq!(err.to_string(), "User is not Signed in");

    let err = sign_out(&store, "never-issued").await.unwrap_err();
    assert!(matches!(err, AuthError::SignOutRestricted));
}

#[tokio::test]
async fn test_sign_out_token_keeps_first_logout_time() {
    let store = MemoryStore::new();
    register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;
    let digest = platform::token::token_digest(&token);

    let mut tx = store.begin().await.unwrap();
    let first = chrono::Utc::now();
    let signed_out = tx.sign_out_token(&digest, first).await.unwrap().unwrap();
    assert_eq!(signed_out.logout_at, Some(first));

    let later = first + chrono::Duration::seconds(5);
    assert!(tx.sign_out_token(&digest, later).await.unwrap().is_none());
    assert!(tx.sign_out_token(&[0u8; 32], later).await.unwrap().is_none());

    let stored = tx.find_token(&digest).await.unwrap().unwrap();
    assert_eq!(stored.logout_at, Some(first));
}

#[tokio::test]
async fn test_concurrent_sign_outs_succeed_once() {
    let store = MemoryStore::new();
    register(&store, "alice").await;
    let token = sign_in(&store, "alice").await;

    let (a, b) = tokio::join!(sign_out(&store, &token), sign_out(&store, &token));
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    assert!(matches!(
        a.err().or(b.err()),
        Some(AuthError::SignOutRestricted)
    ));
}

#[tokio::test]
async fn test_other_tokens_survive_sign_out() {
    let store = MemoryStore::new();
    register(&store, "alice").await;
    let first = sign_in(&store, "alice").await;
    let second = sign_in(&store, "alice").await;
    assert_ne!(first, second);

    sign_out(&store, &first).await.unwrap();
    assert!(authorize(&store, &second, Action::CreateQuestion).await.is_ok());
}

// ============================================================================
// Profile / admin delete
// ============================================================================

#[tokio::test]
async fn test_user_profile() {
    let store = MemoryStore::new();
    let alice = register(&store, "alice").await;
    register(&store, "bob").await;
    let token = sign_in(&store, "bob").await;

    let mut tx = store.begin().await.unwrap();
    let use_case = UserProfileUseCase::new();
    let user = use_case
        .execute(&mut tx, &alice.to_string(), &token)
        .await
        .unwrap();
    assert_eq!(user.user_name.as_str(), "alice");

    for missing in [UserId::new().to_string(), "not-a-uuid".to_string()] {
        let err = use_case
            .execute(&mut tx, &missing, &token)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("USR-001"));
        assert_eq!(err.to_string(), "User with entered uuid does not exist");
    }
}

#[tokio::test]
async fn test_delete_user_requires_admin() {
    let store = MemoryStore::new();
    let alice = register(&store, "alice").await;
    register(&store, "bob").await;
    let token = sign_in(&store, "bob").await;

    let mut tx = store.begin().await.unwrap();
    let err = DeleteUserUseCase::new()
        .execute(&mut tx, &alice.to_string(), &token)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("ATHR-003"));
    assert_eq!(
        err.to_string(),
        "Unauthorized Access, Entered user is not an admin"
    );
}

#[tokio::test]
async fn test_admin_deletes_user_and_their_tokens() {
    let store = MemoryStore::new();
    let alice = register(&store, "alice").await;
    let admin = register(&store, "root").await;
    promote(&store, admin).await;
    let alice_token = sign_in(&store, "alice").await;
    let admin_token = sign_in(&store, "root").await;

    let mut tx = store.begin().await.unwrap();
    let use_case = DeleteUserUseCase::new();
    let deleted = use_case
        .execute(&mut tx, &alice.to_string(), &admin_token)
        .await
        .unwrap();
    assert_eq!(deleted.user_id, alice);

    let err = use_case
        .execute(&mut tx, &alice.to_string(), &admin_token)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "User with entered uuid to be deleted does not exist"
    );
    tx.commit().await.unwrap();

    let err = authorize(&store, &alice_token, Action::AllQuestions)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotSignedIn));

    let tables = store.snapshot().await;
    assert_eq!(tables.users.len(), 1);
    assert!(tables.credentials.iter().all(|c| c.user_id == admin));
}

#[tokio::test]
async fn test_dropped_unit_of_work_rolls_back() {
    let store = MemoryStore::new();
    register(&store, "alice").await;

    {
        let mut tx = store.begin().await.unwrap();
        SignUpUseCase::new(config())
            .execute(&mut tx, sign_up_input("bob"))
            .await
            .unwrap();
        // dropped without commit
    }

    let tables = store.snapshot().await;
    assert_eq!(tables.users.len(), 1);
    assert_eq!(tables.credentials.len(), 1);
}

#[tokio::test]
async fn test_find_users_by_role() {
    let store = MemoryStore::new();
    let admin = register(&store, "root").await;
    register(&store, "alice").await;
    promote(&store, admin).await;

    let mut tx = store.begin().await.unwrap();
    let admins = tx.find_users_by_role(UserRole::Admin).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].user_id, admin);
    assert_eq!(tx.find_users_by_role(UserRole::NonAdmin).await.unwrap().len(), 1);
}

// ============================================================================
// HTTP surface
// ============================================================================

mod http {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::presentation::{ACCESS_TOKEN_HEADER, auth_router};

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_signin_signout_over_http() {
        let store: MemoryStore = MemoryStore::new();
        let app = auth_router(store.clone(), AuthConfig::default());

        let signup = serde_json::json!({
            "firstName": "Alice",
            "lastName": "Liddell",
            "userName": "alice",
            "emailAddress": "alice@example.com",
            "password": "s3cret!",
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/user/signup", signup.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/user/signup", signup))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["code"], "SGR-001");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/user/signin",
                serde_json::json!({ "userName": "alice", "password": "s3cret!" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = response
            .headers()
            .get(ACCESS_TOKEN_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let signout = || {
            Request::builder()
                .method("POST")
                .uri("/user/signout")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap()
        };
        let response = app.clone().oneshot(signout()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "SIGNED OUT SUCCESSFULLY");

        let response = app.clone().oneshot(signout()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_without_token_is_forbidden() {
        let store = MemoryStore::new();
        let alice = register(&store, "alice").await;
        let app = auth_router(store, AuthConfig::default());

        let response = app
            .oneshot(
                Request::get(format!("/userprofile/{alice}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["code"], "ATHR-001");
        assert_eq!(body["detail"], "User has not signed in");
    }
}
