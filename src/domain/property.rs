//! Property (facility) domain model

use super::common::{EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Facility owned or managed by the club (court, pool, hall, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_available() -> bool {
    true
}

/// Input for creating a property
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub kind: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(range(min = 1, max = 100000))]
    pub capacity: Option<u32>,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Input for updating a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 60))]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100000))]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Resource for Property {
    type Create = CreatePropertyInput;
    type Update = UpdatePropertyInput;

    const KIND: ResourceKind = ResourceKind::Property;

    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let input = CreatePropertyInput {
            club_id: 1,
            name: "Cancha 1".to_string(),
            kind: "futbol".to_string(),
            location: None,
            capacity: Some(0),
            available: true,
        };
        assert!(input
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("capacity"));
    }

    #[test]
    fn test_property_defaults_available() {
        let property: Property =
            serde_json::from_str(r#"{"id":1,"clubId":1,"name":"Pileta","kind":"natacion"}"#)
                .unwrap();
        assert!(property.available);
        assert_eq!(property.capacity, None);
    }
}
