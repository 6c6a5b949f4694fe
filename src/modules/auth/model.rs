use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// The user object submitted at sign-in. Everything besides `email` is
/// carried into the token unchanged.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct SessionRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(flatten)]
    pub profile: HashMap<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
