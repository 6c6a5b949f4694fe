//! # Old-school Auth
//!
//! Session token types and JWT utilities.
//!
//! - [`claims`]: the [`Claims`] carried by a session token
//! - [`jwt`]: token issuance and verification
//!
//! A session token carries whatever user fields were submitted at sign-in,
//! plus `iat`/`exp`. It is never persisted.
//!
//! # Example
//!
//! ```ignore
//! use old_school_auth::{create_session_token, verify_token};
//! use old_school_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token("ada@school.test", profile, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_session_token, verify_token};
