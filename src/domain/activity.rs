//! Activity domain model

use super::common::{EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Scheduled club activity (class, match, event)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "property_id")]
    pub property_id: Option<EntityId>,
    #[serde(alias = "starts_at")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "ends_at")]
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for scheduling an activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_schedule"))]
pub struct CreateActivityInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(alias = "property_id")]
    pub property_id: Option<EntityId>,
    #[serde(alias = "starts_at")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "ends_at")]
    pub ends_at: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub capacity: Option<u32>,
}

/// Input for updating an activity
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_schedule"))]
pub struct UpdateActivityInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "property_id")]
    pub property_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "starts_at")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "ends_at")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub capacity: Option<u32>,
}

fn check_schedule(starts_at: &DateTime<Utc>, ends_at: &DateTime<Utc>) -> Result<(), ValidationError> {
    if ends_at > starts_at {
        Ok(())
    } else {
        Err(ValidationError::new("ends_before_start"))
    }
}

fn validate_create_schedule(input: &CreateActivityInput) -> Result<(), ValidationError> {
    check_schedule(&input.starts_at, &input.ends_at)
}

// Only checkable when both bounds are supplied; the backend sees the full record.
fn validate_update_schedule(input: &UpdateActivityInput) -> Result<(), ValidationError> {
    match (&input.starts_at, &input.ends_at) {
        (Some(starts_at), Some(ends_at)) => check_schedule(starts_at, ends_at),
        _ => Ok(()),
    }
}

impl Resource for Activity {
    type Create = CreateActivityInput;
    type Update = UpdateActivityInput;

    const KIND: ResourceKind = ResourceKind::Activity;

    fn id(&self) -> EntityId {
        self.id
    }
}
