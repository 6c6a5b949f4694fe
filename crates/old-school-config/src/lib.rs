//! # Old-school Config
//!
//! Configuration types for the old-school API, loaded from environment
//! variables:
//!
//! - [`server`]: listen address (`HOST`, `PORT`)
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: session token secret and lifetime
//! - [`cors`]: allowed origins
//!
//! # Example
//!
//! ```ignore
//! use old_school_config::{DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! let jwt = JwtConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Parses `name` from the environment, falling back to `default` when the
/// variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_rejects_negative_expiry() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("OLD_SCHOOL_TEST_NEGATIVE_EXPIRY", "-5") };

        assert_eq!(env_or::<u64>("OLD_SCHOOL_TEST_NEGATIVE_EXPIRY", 3600), 3600);
    }

    #[test]
    fn test_env_or_unset_uses_default() {
        assert_eq!(env_or::<u64>("OLD_SCHOOL_TEST_UNSET_VARIABLE", 42), 42);
    }
}
