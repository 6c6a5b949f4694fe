use old_school_config::{CorsConfig, JwtConfig};
use sqlx::PgPool;

/// Shared by every handler. The pool is opened once in `main` and closed
/// there after the server stops.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
        }
    }
}
