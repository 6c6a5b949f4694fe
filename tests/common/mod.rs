use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use old_school::modules::users::model::{User, UserRole};
use old_school::old_school_auth::create_session_token;
use old_school::old_school_config::{CorsConfig, JwtConfig};
use old_school::router::init_router;
use old_school::state::AppState;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::parse("http://localhost:5173"),
    );
    init_router(state)
}

/// Inserts a user straight into the store, bypassing registration.
#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, email: &str, role: Option<UserRole>) -> User {
    sqlx::query_as::<_, User>(
        r#"INSERT INTO users (email, role, profile)
           VALUES ($1, $2, '{"name": "Test User"}'::jsonb)
           RETURNING id, email, role, profile, created_at"#,
    )
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn token_for(email: &str) -> String {
    create_session_token(email, Map::new(), &test_jwt_config()).unwrap()
}

/// A stored user with `role` and a valid token for them.
#[allow(dead_code)]
pub async fn signed_in(pool: &PgPool, role: Option<UserRole>) -> (User, String) {
    let email = generate_unique_email();
    let user = create_test_user(pool, &email, role).await;
    let token = token_for(&email);
    (user, token)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Runs one request through the router and decodes the JSON body
/// (`Value::Null` when the body is not JSON).
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
