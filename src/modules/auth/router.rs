use crate::modules::auth::controller::issue_token;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}
