//! Shared utilities.
//!
//! - [`results`]: delete/update outcome bodies and the plain message body

pub mod results;
