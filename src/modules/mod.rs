//! Feature modules. Each has a `model`, `controller` and `router`; the two
//! stores add a `service` holding their queries.

pub mod auth;
pub mod classes;
pub mod users;
