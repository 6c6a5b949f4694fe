//! Request guards.
//!
//! - [`auth`]: the credential verifier ([`auth::AuthUser`] extractor)
//! - [`role`]: role guards built on top of it ([`role::RequireAdmin`],
//!   [`role::RequireInstructor`])
//!
//! # Authorization Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies signature and expiry: 401 on failure
//! 3. A role guard loads the caller's stored role: 403 on mismatch
//! 4. The handler runs its single store operation

pub mod auth;
pub mod role;
