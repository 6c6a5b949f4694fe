use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use old_school_auth::{Claims, verify_token};
use old_school_core::AppError;

use crate::state::AppState;

pub const NO_TOKEN: &str = "No token provided";
pub const BAD_AUTH_HEADER: &str = "Invalid authorization header";

/// Extractor that validates the bearer token and yields its claims.
///
/// Handlers and guards receive the verified identity as this value; nothing
/// is written back onto the request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Whether the token was issued to `email`.
    pub fn owns(&self, email: &str) -> bool {
        self.0.is_for(email)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized(NO_TOKEN)
                    } else {
                        AppError::unauthorized(BAD_AUTH_HEADER)
                    }
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config).inspect_err(|_| {
            debug!("Rejected bearer token");
        })?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_owns_matches_token_email_only() {
        let auth_user = AuthUser(Claims::new("ada@school.test", Map::new(), 0, 9999999999));

        assert_eq!(auth_user.email(), "ada@school.test");
        assert!(auth_user.owns("ada@school.test"));
        assert!(!auth_user.owns("grace@school.test"));
    }
}
