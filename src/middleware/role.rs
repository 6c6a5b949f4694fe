//! Role guards.
//!
//! A role guard runs after the credential verifier: it loads the caller's
//! stored user by token email and rejects the request with 403 unless that
//! user holds the required role. The check hits the store on every request.
//!
//! [`require_role!`] stamps out one extractor per role:
//!
//! ```rust,ignore
//! use crate::middleware::role::RequireAdmin;
//!
//! pub async fn handler(RequireAdmin(auth_user): RequireAdmin) -> Result<Json<..>, AppError> {
//!     // Only stored admins get here
//! }
//! ```

use sqlx::PgPool;
use tracing::warn;

use old_school_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::UserRole;
use crate::modules::users::service::UserService;

/// Checks a stored role against the required one.
pub fn check_role(stored: Option<UserRole>, required: UserRole) -> Result<(), AppError> {
    if stored != Some(required) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}",
            required
        )));
    }

    Ok(())
}

/// Loads the caller's stored role and checks it. Callers with no stored
/// user record are rejected like callers with the wrong role.
pub async fn ensure_role(
    db: &PgPool,
    auth_user: &AuthUser,
    required: UserRole,
) -> Result<(), AppError> {
    let stored = UserService::find_by_email(db, auth_user.email())
        .await?
        .and_then(|user| user.role);

    check_role(stored, required).inspect_err(|_| {
        warn!(
            email = %auth_user.email(),
            required = %required,
            "Role check failed"
        );
    })
}

/// Declares an extractor that verifies the bearer token, then requires a stored role.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = old_school_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::role::ensure_role(&state.db, &auth_user, $role).await?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, UserRole::Admin);
require_role!(RequireInstructor, UserRole::Instructor);
