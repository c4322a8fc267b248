//! Payment domain model

use super::common::{validate_currency, EntityId, Resource, ResourceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

/// Payment made by a member (fees, dues, activity charges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: EntityId,
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[serde(default, alias = "member_id")]
    pub member_id: Option<EntityId>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub concept: String,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, alias = "paid_on")]
    pub paid_on: Option<NaiveDate>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updated_at")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "ARS".to_string()
}

/// Input for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentInput {
    #[serde(alias = "club_id")]
    pub club_id: EntityId,
    #[serde(alias = "member_id")]
    pub member_id: Option<EntityId>,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
    #[validate(length(min = 1, max = 255))]
    pub concept: String,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(alias = "paid_on")]
    pub paid_on: Option<NaiveDate>,
}

/// Input for updating a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0))]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub concept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "paid_on")]
    pub paid_on: Option<NaiveDate>,
}

impl Resource for Payment {
    type Create = CreatePaymentInput;
    type Update = UpdatePaymentInput;

    const KIND: ResourceKind = ResourceKind::Payment;

    fn id(&self) -> EntityId {
        self.id
    }
}
