//! # Old-school Core
//!
//! Shared error type for the old-school API.
//!
//! Every handler and guard returns [`AppError`] on failure. The error carries
//! an HTTP status and renders as a minimal `{ "error": true, "message": .. }`
//! JSON body.
//!
//! # Example
//!
//! ```ignore
//! use old_school_core::AppError;
//!
//! let error = AppError::unauthorized("No token provided");
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
