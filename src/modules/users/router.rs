use crate::modules::users::controller::{
    check_admin, check_instructor, delete_user, get_users, make_admin, make_instructor,
    register_user,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

// GET takes an email and PATCH a user id in the same path segment.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(register_user))
        .route("/{id}", delete(delete_user))
        .route("/admin/{key}", get(check_admin).patch(make_admin))
        .route("/instructor/{key}", get(check_instructor).patch(make_instructor))
}
