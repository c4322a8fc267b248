//! User domain model

use super::common::{EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Dashboard user (an operator of a club, not a club member)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub email: String,
    pub name: String,
    #[serde(default, alias = "role_id")]
    pub role_id: Option<EntityId>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(alias = "role_id")]
    pub role_id: Option<EntityId>,
}

/// Input for updating a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "role_id")]
    pub role_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Resource for User {
    type Create = CreateUserInput;
    type Update = UpdateUserInput;

    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> EntityId {
        self.id
    }
}
