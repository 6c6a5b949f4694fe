use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode, request::Parts};
use old_school::middleware::auth::AuthUser;
use old_school::middleware::role::{RequireAdmin, RequireInstructor};
use old_school::old_school_auth::create_session_token;
use old_school::old_school_config::{CorsConfig, JwtConfig};
use old_school::state::AppState;
use serde_json::{Map, json};
use sqlx::postgres::PgPoolOptions;

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

/// State over a pool that never connects: these extractors must reject
/// before any store lookup happens.
fn offline_state() -> AppState {
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
        .unwrap();
    AppState::new(db, test_jwt_config(), CorsConfig::parse("http://localhost:5173"))
}

fn parts_with_authorization(value: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/users");
    if let Some(value) = value {
        builder = builder.header("authorization", value);
    }
    builder.body(()).unwrap().into_parts().0
}

#[tokio::test]
async fn test_auth_user_carries_token_profile() {
    let state = offline_state();
    let profile = json!({ "name": "Ada" }).as_object().cloned().unwrap();
    let token = create_session_token("ada@school.test", profile, &state.jwt_config).unwrap();
    let mut parts = parts_with_authorization(Some(&format!("Bearer {}", token)));

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();

    assert_eq!(auth_user.email(), "ada@school.test");
    assert_eq!(auth_user.0.profile["name"], "Ada");
    assert!(auth_user.owns("ada@school.test"));
    assert!(!auth_user.owns("ADA@school.test"));
}

#[tokio::test]
async fn test_auth_user_missing_header() {
    let state = offline_state();
    let mut parts = parts_with_authorization(None);

    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.public_message(), "No token provided");
}

#[tokio::test]
async fn test_auth_user_bearer_without_token() {
    let state = offline_state();
    let mut parts = parts_with_authorization(Some("Bearer"));

    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.public_message(), "Invalid authorization header");
}

#[tokio::test]
async fn test_auth_user_rejects_token_from_other_secret() {
    let state = offline_state();
    let other = JwtConfig {
        secret: "someone-elses-secret".to_string(),
        token_expiry: 3600,
    };
    let token = create_session_token("ada@school.test", Map::new(), &other).unwrap();
    let mut parts = parts_with_authorization(Some(&format!("Bearer {}", token)));

    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();

    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.public_message(), "Invalid or expired token");
}

#[tokio::test]
async fn test_role_guards_reject_before_store_lookup() {
    let state = offline_state();

    let mut parts = parts_with_authorization(None);
    let err = RequireAdmin::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);

    let mut parts = parts_with_authorization(Some("Bearer not-a-jwt"));
    let err = RequireInstructor::from_request_parts(&mut parts, &state)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}
