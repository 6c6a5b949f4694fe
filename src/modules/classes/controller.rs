use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use old_school_core::{AppError, ErrorResponse};

use crate::middleware::role::{RequireAdmin, RequireInstructor};
use crate::modules::classes::model::{Class, CreateClassDto};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::utils::results::DeleteResult;
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "All classes", body = Vec<Class>)
    ),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(State(state): State<AppState>) -> Result<Json<Vec<Class>>, AppError> {
    let classes = ClassService::get_classes(&state.db).await?;
    Ok(Json(classes))
}

/// Add a class. The submitted object is stored as-is.
#[utoipa::path(
    post,
    path = "/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    RequireInstructor(_instructor): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = ClassService::create_class(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(("id" = Uuid, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Delete outcome; zero when the id is unknown", body = DeleteResult),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<DeleteResult>, AppError> {
    let result = ClassService::delete_class(&state.db, id).await?;
    Ok(Json(result))
}
