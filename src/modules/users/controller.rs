use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;
use uuid::Uuid;

use old_school_core::{AppError, ErrorResponse};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::users::model::{
    AdminStatus, InstructorStatus, RegisterUserDto, USER_ALREADY_EXISTS, User, UserRole,
};
use crate::modules::users::service::{RegisterOutcome, UserService};
use crate::state::AppState;
use crate::utils::results::{DeleteResult, MessageResponse, UpdateResult};
use crate::validator::{ValidatedJson, ValidatedPath};

/// List every user
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// Register a user on first sign-in
///
/// Registering an email that already exists is not an error: the existing
/// record is left alone and a message is returned instead.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 200, description = "User already exists", body = MessageResponse),
        (status = 400, description = "Body is not a JSON object or email is missing", body = ErrorResponse),
        (status = 422, description = "Email is empty", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<Response, AppError> {
    let response = match UserService::register_user(&state.db, dto).await? {
        RegisterOutcome::Created(user) => (StatusCode::CREATED, Json(user)).into_response(),
        RegisterOutcome::AlreadyExists => {
            Json(MessageResponse::new(USER_ALREADY_EXISTS)).into_response()
        }
    };

    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete outcome; zero when the id is unknown", body = DeleteResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = UserService::delete_user(&state.db, id).await?;
    Ok(Json(result))
}

/// Whether the caller's own email belongs to an admin
///
/// Asking about any email other than the one in the caller's token
/// answers `false` without touching the store.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    params(("email" = String, Path, description = "Email to check")),
    responses(
        (status = 200, description = "Admin status", body = AdminStatus),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn check_admin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(email): ValidatedPath<String>,
) -> Result<Json<AdminStatus>, AppError> {
    if !auth_user.owns(&email) {
        return Ok(Json(AdminStatus { admin: false }));
    }

    let admin = UserService::has_role(&state.db, &email, UserRole::Admin).await?;
    Ok(Json(AdminStatus { admin }))
}

/// Whether the caller's own email belongs to an instructor
#[utoipa::path(
    get,
    path = "/users/instructor/{email}",
    params(("email" = String, Path, description = "Email to check")),
    responses(
        (status = 200, description = "Instructor status", body = InstructorStatus),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user))]
pub async fn check_instructor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(email): ValidatedPath<String>,
) -> Result<Json<InstructorStatus>, AppError> {
    if !auth_user.owns(&email) {
        return Ok(Json(InstructorStatus { instructor: false }));
    }

    let instructor = UserService::has_role(&state.db, &email, UserRole::Instructor).await?;
    Ok(Json(InstructorStatus { instructor }))
}

/// Promote a user to admin
#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update outcome; zero when the id is unknown", body = UpdateResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn make_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = UserService::set_role(&state.db, id, UserRole::Admin).await?;
    Ok(Json(result))
}

/// Promote a user to instructor
#[utoipa::path(
    patch,
    path = "/users/instructor/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update outcome; zero when the id is unknown", body = UpdateResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn make_instructor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<UpdateResult>, AppError> {
    let result = UserService::set_role(&state.db, id, UserRole::Instructor).await?;
    Ok(Json(result))
}
