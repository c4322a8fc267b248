//! Club domain model

use super::common::{validate_phone, EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Club entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, alias = "logo_url")]
    pub logo_url: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a club
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(alias = "logo_url")]
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Input for updating a club
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "logo_url")]
    #[validate(url)]
    pub logo_url: Option<String>,
}

impl Resource for Club {
    type Create = CreateClubInput;
    type Update = UpdateClubInput;

    const KIND: ResourceKind = ResourceKind::Club;

    fn id(&self) -> EntityId {
        self.id
    }
}
