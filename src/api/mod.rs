//! REST API handlers and shared response helpers

pub mod auth;
pub mod health;
pub mod metrics;
pub mod resource;

use crate::backend::BackendResponse;
use crate::domain::ResourceKind;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Success response with message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Send the backend's answer back to the caller unchanged.
///
/// JSON bodies keep their status; `204` and empty bodies come back empty.
pub(crate) fn relay(response: BackendResponse) -> Response {
    let status = response.status;
    match response.body {
        Value::Null => status.into_response(),
        _ if status == StatusCode::NO_CONTENT => status.into_response(),
        body => (status, Json(body)).into_response(),
    }
}

/// Count a proxied call by entity, method and backend status
pub(crate) fn record_proxy_request(resource: &str, method: &Method, status: StatusCode) {
    ::metrics::counter!(
        "club_portal_proxy_requests_total",
        "resource" => resource.to_string(),
        "method" => method.to_string(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

pub(crate) fn record_resource_request(kind: ResourceKind, method: &Method, status: StatusCode) {
    record_proxy_request(kind.path(), method, status);
}
