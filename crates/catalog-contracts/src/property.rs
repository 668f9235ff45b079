// Property DTOs
//
// Same (name, type) identity convention as events, but `type` is the closed
// set {string, number, boolean}.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Allowed property value types.
pub const PROPERTY_TYPES: &[&str] = &["string", "number", "boolean"];

/// A catalog property (a field expected inside an event payload).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a property.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to update a property. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePropertyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_wire_shape() {
        let property = Property {
            id: 3,
            name: "product_id".to_string(),
            property_type: "string".to_string(),
            description: "SKU of the product".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let parsed: serde_json::Value =
            serde_json::to_value(&property).expect("Failed to serialize");
        assert_eq!(parsed["type"], "string");
        assert!(parsed.get("property_type").is_none());
    }

    #[test]
    fn test_allowed_types() {
        assert!(PROPERTY_TYPES.contains(&"string"));
        assert!(PROPERTY_TYPES.contains(&"number"));
        assert!(PROPERTY_TYPES.contains(&"boolean"));
        assert!(!PROPERTY_TYPES.contains(&"object"));
    }
}
