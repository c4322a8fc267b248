//! Sponsor domain model

use super::common::{validate_phone, EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Club sponsor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub name: String,
    #[serde(default, alias = "contact_name")]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Yearly contribution in the club's currency
    #[serde(default)]
    pub contribution: f64,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a sponsor
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSponsorInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(alias = "contact_name")]
    #[validate(length(max = 120))]
    pub contact_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub contribution: f64,
}

/// Input for updating a sponsor
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSponsorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "contact_name")]
    #[validate(length(max = 120))]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub contribution: Option<f64>,
}

impl Resource for Sponsor {
    type Create = CreateSponsorInput;
    type Update = UpdateSponsorInput;

    const KIND: ResourceKind = ResourceKind::Sponsor;

    fn id(&self) -> EntityId {
        self.id
    }
}
