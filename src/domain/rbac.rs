//! Role and permission domain models

use super::common::{EntityId, Resource, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Role granted to dashboard users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "permission_ids")]
    pub permission_ids: Vec<EntityId>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Permission (e.g., "members:write")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a role
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[serde(default, alias = "permission_ids")]
    pub permission_ids: Vec<EntityId>,
}

/// Input for updating a role
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 60))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "permission_ids")]
    pub permission_ids: Option<Vec<EntityId>>,
}

/// Input for creating a permission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermissionInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_permission_code")
    )]
    pub code: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Input for updating a permission
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermissionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_permission_code")
    )]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub description: Option<String>,
}

/// Validate permission code format (e.g., "members:read", "payments:export")
fn validate_permission_code(code: &str) -> Result<(), validator::ValidationError> {
    if PERMISSION_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_permission_code"))
    }
}

// Regex for permission code validation
lazy_static::lazy_static! {
    pub static ref PERMISSION_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z][a-z_]*:[a-z][a-z_]*$").unwrap();
}

impl Resource for Role {
    type Create = CreateRoleInput;
    type Update = UpdateRoleInput;

    const KIND: ResourceKind = ResourceKind::Role;

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Resource for Permission {
    type Create = CreatePermissionInput;
    type Update = UpdatePermissionInput;

    const KIND: ResourceKind = ResourceKind::Permission;

    fn id(&self) -> EntityId {
        self.id
    }
}
