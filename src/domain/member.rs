//! Member domain model

use super::common::{validate_phone, EntityId, Resource, ResourceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Membership status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Inactive => write!(f, "inactive"),
            MembershipStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Club member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[serde(alias = "first_name")]
    pub first_name: String,
    #[serde(alias = "last_name")]
    pub last_name: String,
    #[serde(alias = "document_id")]
    pub document_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "birth_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MembershipStatus,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for registering a member
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[serde(alias = "first_name")]
    #[validate(length(min = 1, max = 80))]
    pub first_name: String,
    #[serde(alias = "last_name")]
    #[validate(length(min = 1, max = 80))]
    pub last_name: String,
    #[serde(alias = "document_id")]
    #[validate(length(min = 1, max = 32))]
    pub document_id: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(alias = "birth_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MembershipStatus,
}

/// Input for updating a member
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberInput {
    #[serde(skip_serializing_if = "Option::is_none", alias = "first_name")]
    #[validate(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "last_name")]
    #[validate(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "document_id")]
    #[validate(length(min = 1, max = 32))]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "birth_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MembershipStatus>,
}

impl Resource for Member {
    type Create = CreateMemberInput;
    type Update = UpdateMemberInput;

    const KIND: ResourceKind = ResourceKind::Member;

    fn id(&self) -> EntityId {
        self.id
    }
}
