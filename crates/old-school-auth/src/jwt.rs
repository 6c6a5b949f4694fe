//! Session token issuance and verification.
//!
//! Tokens are HS256-signed with the shared secret from [`JwtConfig`] and
//! expire `token_expiry` seconds after issuance.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use old_school_config::JwtConfig;
use old_school_core::AppError;

use crate::claims::Claims;

/// Signs a session token for `email` carrying the submitted `profile` fields.
///
/// # Errors
///
/// Returns an internal error if the expiry overflows or encoding fails.
pub fn create_session_token(
    email: &str,
    profile: Map<String, Value>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = usize::try_from(jwt_config.token_expiry)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| AppError::internal(anyhow!("Token expiry is out of range")))?;

    let claims = Claims::new(email, profile, now, exp);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry, returning the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, signed with
/// another secret, or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            token_expiry: 3600,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let profile = json!({"name": "Ada"}).as_object().cloned().unwrap();

        let token = create_session_token("ada@school.test", profile, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.email, "ada@school.test");
        assert_eq!(claims.profile["name"], "Ada");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_session_token("ada@school.test", Map::new(), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            token_expiry: 3600,
        };

        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims::new("ada@school.test", Map::new(), now - 7200, now - 3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let config = JwtConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            token_expiry: u64::MAX,
        };

        let err = create_session_token("ada@school.test", Map::new(), &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("not.a.token", &test_config()).is_err());
    }
}
