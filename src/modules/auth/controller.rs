use axum::Json;
use axum::extract::State;
use tracing::{info, instrument};

use old_school_auth::create_session_token;
use old_school_core::{AppError, ErrorResponse};

use super::model::{SessionRequest, TokenResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Issue a session token for the submitted user object
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Signed session token, valid for one hour by default", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object or email is missing", body = ErrorResponse),
        (status = 422, description = "Email is empty", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SessionRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let profile = dto.profile.into_iter().collect();
    let token = create_session_token(&dto.email, profile, &state.jwt_config)?;

    info!("Session token issued");

    Ok(Json(TokenResponse { token }))
}
