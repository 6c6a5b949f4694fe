use std::env;

use crate::env_or;

pub const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds
    pub token_expiry: u64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            token_expiry: env_or("JWT_EXPIRY", 3600), // 1 hour
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detected() {
        let config = JwtConfig {
            secret: DEFAULT_SECRET.to_string(),
            token_expiry: 3600,
        };
        assert!(config.uses_default_secret());

        let config = JwtConfig {
            secret: "something-else".to_string(),
            token_expiry: 3600,
        };
        assert!(!config.uses_default_secret());
    }
}
