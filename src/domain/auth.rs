//! Authentication DTOs exchanged with the backend

use super::common::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Credentials submitted on sign-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body of `/auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshInput {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

/// Tokens issued by the backend on login or refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
    /// Absent when the backend does not rotate refresh tokens
    #[serde(default, alias = "refresh_token", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "expires_in", skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// Profile of the signed-in dashboard user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "club_id")]
    pub club_id: Option<EntityId>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Profile {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
