use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Keys owned by the store; submitted values for these are dropped.
pub const RESERVED_CLASS_FIELDS: [&str; 2] = ["id", "created_at"];

/// A class as submitted, plus the identity the store assigned to it.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Class {
    pub id: Uuid,
    #[sqlx(json)]
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Any JSON object.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct CreateClassDto {
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl CreateClassDto {
    pub fn into_fields(mut self) -> HashMap<String, Value> {
        for key in RESERVED_CLASS_FIELDS {
            self.fields.remove(key);
        }
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_dto_keeps_fields_verbatim() {
        let dto: CreateClassDto = serde_json::from_value(json!({
            "name": "Watercolor Basics",
            "seats": 12,
            "tags": ["art", "beginner"],
            "id": "ignored"
        }))
        .unwrap();

        let fields = dto.into_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["seats"], 12);
        assert_eq!(fields["tags"], json!(["art", "beginner"]));
    }

    #[test]
    fn test_class_serializes_flat() {
        let class = Class {
            id: Uuid::nil(),
            fields: HashMap::from([("name".to_string(), json!("Pottery"))]),
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(&class).unwrap();
        assert_eq!(body["name"], "Pottery");
        assert_eq!(body["id"], Uuid::nil().to_string());
        assert!(body.get("fields").is_none());
    }
}
