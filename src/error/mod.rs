//! Unified error handling for Club Portal

use crate::i18n::{t, Locale, MessageKey};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Non-2xx answer from the backend service, with the message it reported
    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },

    #[error("Backend unreachable: {0}")]
    Upstream(String),

    #[error("Backend timed out: {0}")]
    UpstreamTimeout(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_)
            | AppError::SessionExpired
            | AppError::InvalidCredentials
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Backend { status, .. } => *status,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error means the stored credentials are no longer usable
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized(_) | AppError::SessionExpired | AppError::Jwt(_)
        ) || matches!(self, AppError::Backend { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// Dictionary key for errors whose text is generated locally.
    ///
    /// Backend errors return `None`: their message comes from the backend
    /// and is shown verbatim.
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            AppError::NotFound(_) => Some(MessageKey::NotFound),
            AppError::BadRequest(_) => Some(MessageKey::BadRequest),
            AppError::Unauthorized(_) | AppError::Jwt(_) => Some(MessageKey::InvalidToken),
            AppError::SessionExpired => Some(MessageKey::SessionExpired),
            AppError::InvalidCredentials => Some(MessageKey::InvalidCredentials),
            AppError::Forbidden(_) => Some(MessageKey::Forbidden),
            AppError::Validation { .. } => Some(MessageKey::ValidationFailed),
            AppError::Backend { .. } => None,
            AppError::Upstream(_) => Some(MessageKey::BackendUnavailable),
            AppError::UpstreamTimeout(_) => Some(MessageKey::BackendTimeout),
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                Some(MessageKey::InternalError)
            }
        }
    }

    /// Text suitable for an end user in the given locale
    pub fn localized(&self, locale: Locale) -> String {
        match self {
            AppError::Backend { message, .. } => message.clone(),
            other => other
                .message_key()
                .map(|key| t(locale, key).to_string())
                .unwrap_or_else(|| other.to_string()),
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::SessionExpired => "session_expired",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Forbidden(_) => "forbidden",
            AppError::Validation { .. } => "validation",
            AppError::Backend { .. } => "backend_error",
            AppError::Upstream(_) => "backend_unavailable",
            AppError::UpstreamTimeout(_) => "backend_timeout",
            AppError::Jwt(_) => "jwt_error",
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                "internal_error"
            }
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Attached to error responses whose message can be re-rendered in the
/// caller's locale by [`crate::middleware::localize_error_response`].
#[derive(Debug, Clone)]
pub struct LocalizableError {
    pub error_type: &'static str,
    pub key: MessageKey,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(e) => tracing::error!("Session storage error: {:?}", e),
            AppError::Serialization(e) => tracing::error!("Serialization error: {:?}", e),
            AppError::Internal(e) => tracing::error!("Internal error: {:?}", e),
            AppError::Upstream(msg) => tracing::error!("Backend unreachable: {}", msg),
            AppError::UpstreamTimeout(msg) => tracing::warn!("Backend timed out: {}", msg),
            AppError::Jwt(e) => tracing::debug!("JWT error: {:?}", e),
            _ => {}
        }

        let status = self.status();
        let error_type = self.error_type();
        let details = match &self {
            AppError::Validation { message, details } => details
                .clone()
                .or_else(|| Some(serde_json::Value::String(message.clone()))),
            _ => None,
        };

        match self.message_key() {
            Some(key) => localized_response(status, error_type, key, details),
            None => {
                let body = Json(ErrorResponse {
                    error: error_type.to_string(),
                    message: self.localized(Locale::default()),
                    details,
                });
                (status, body).into_response()
            }
        }
    }
}

/// Error response rendered in the default locale and tagged so the
/// localization middleware can re-render it for the caller.
pub(crate) fn localized_response(
    status: StatusCode,
    error_type: &'static str,
    key: MessageKey,
    details: Option<serde_json::Value>,
) -> Response {
    let body = Json(ErrorResponse {
        error: error_type.to_string(),
        message: t(Locale::default(), key).to_string(),
        details: details.clone(),
    });
    let mut response = (status, body).into_response();
    response.extensions_mut().insert(LocalizableError {
        error_type,
        key,
        details,
    });
    response
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation {
            message: errors.to_string(),
            details: serde_json::to_value(&errors).ok(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::UpstreamTimeout(e.to_string())
        } else if e.is_decode() {
            AppError::Upstream(format!("Invalid backend response: {}", e))
        } else {
            AppError::Upstream(e.to_string())
        }
    }
}
