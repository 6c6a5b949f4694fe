//! User data models and DTOs.
//!
//! A [`User`] is keyed by email and carries an optional [`UserRole`] plus an
//! open set of profile fields submitted at registration. The profile is kept
//! as a JSONB object and flattened back into the record when serialized.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const USER_ALREADY_EXISTS: &str = "User already exists!";

/// Profile keys owned by the store; submitted values for these are dropped.
pub const RESERVED_USER_FIELDS: [&str; 4] = ["id", "email", "role", "created_at"];

/// Roles a user can be promoted to. A user with no role has `role: null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Instructor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Instructor => "instructor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "instructor" => Ok(UserRole::Instructor),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Option<UserRole>,
    #[sqlx(json)]
    #[serde(flatten)]
    pub profile: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }
}

/// Registration body: any JSON object with a non-empty `email`.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(flatten)]
    pub profile: HashMap<String, Value>,
}

impl RegisterUserDto {
    /// Profile fields with store-owned keys removed.
    pub fn into_parts(mut self) -> (String, HashMap<String, Value>) {
        for key in RESERVED_USER_FIELDS {
            self.profile.remove(key);
        }
        (self.email, self.profile)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct InstructorStatus {
    pub instructor: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trip_strings() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(" Instructor ".parse::<UserRole>().unwrap(), UserRole::Instructor);
        assert!("student".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Instructor.to_string(), "instructor");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), json!("admin"));
    }

    #[test]
    fn test_register_dto_drops_reserved_fields() {
        let dto: RegisterUserDto = serde_json::from_value(json!({
            "email": "ada@school.test",
            "name": "Ada",
            "role": "admin",
            "id": "not-yours"
        }))
        .unwrap();

        let (email, profile) = dto.into_parts();
        assert_eq!(email, "ada@school.test");
        assert_eq!(profile.len(), 1);
        assert_eq!(profile["name"], "Ada");
    }

    #[test]
    fn test_empty_email_fails_validation() {
        let dto: RegisterUserDto = serde_json::from_value(json!({ "email": "" })).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_user_serializes_flat() {
        let user = User {
            id: Uuid::nil(),
            email: "ada@school.test".to_string(),
            role: None,
            profile: HashMap::from([("name".to_string(), json!("Ada"))]),
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(&user).unwrap();
        assert_eq!(body["email"], "ada@school.test");
        assert_eq!(body["role"], Value::Null);
        assert_eq!(body["name"], "Ada");
        assert!(body.get("profile").is_none());
    }
}
