use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by the token itself; submitted fields with these names are dropped.
pub const RESERVED_CLAIMS: [&str; 3] = ["email", "exp", "iat"];

/// JWT claims for session tokens.
///
/// `email` identifies the caller for role lookups. Every other submitted
/// field is carried through untouched in `profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn new(email: &str, mut profile: Map<String, Value>, iat: usize, exp: usize) -> Self {
        for key in RESERVED_CLAIMS {
            profile.remove(key);
        }

        Self {
            email: email.to_string(),
            profile,
            exp,
            iat,
        }
    }

    /// Whether this token was issued to `email`.
    pub fn is_for(&self, email: &str) -> bool {
        self.email == email
    }
}
