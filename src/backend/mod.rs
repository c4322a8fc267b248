//! Backend service client
//!
//! This module provides a thin client for the relational-database-backed
//! service the portal fronts. Calls take the bearer token explicitly; the
//! session layer decides which token to send and when to refresh it.

use crate::config::BackendConfig;
use crate::domain::{LoginInput, Profile, RefreshInput, TokenPair};
use crate::error::{AppError, Result};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Backend API client
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http_client: Client,
    health_timeout: Duration,
}

/// Status and decoded body of a backend response
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Outcome of a backend health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub latency_ms: u64,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            http_client,
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and decode the response body.
    ///
    /// `query` is appended verbatim (without the leading `?`).
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<BackendResponse> {
        let mut url = self.url(path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(q);
        }

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %method, path = %path, error = %e, "Backend request failed");
            AppError::from(e)
        })?;
        let status = response.status();
        metrics::histogram!(
            "club_portal_backend_request_duration_seconds",
            "method" => method.to_string()
        )
        .record(started.elapsed().as_secs_f64());

        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        tracing::debug!(method = %method, path = %path, status = %status, "Backend responded");
        Ok(BackendResponse { status, body })
    }

    /// Sign in with email and password
    pub async fn login(&self, input: &LoginInput) -> Result<TokenPair> {
        let body = serde_json::to_value(input)?;
        self.send(Method::POST, "auth/login", None, None, Some(&body))
            .await?
            .into_result()
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let body = serde_json::to_value(RefreshInput {
            refresh_token: refresh_token.to_string(),
        })?;
        self.send(Method::POST, "auth/refresh", None, None, Some(&body))
            .await?
            .into_result()
    }

    /// Fetch the profile of the token's owner
    pub async fn profile(&self, token: &str) -> Result<Profile> {
        self.send(Method::GET, "auth/profile", Some(token), None, None)
            .await?
            .into_result()
    }

    /// Probe the backend with a fixed, short timeout
    pub async fn health(&self) -> BackendHealth {
        let started = Instant::now();
        let result = self
            .http_client
            .get(self.url("health"))
            .timeout(self.health_timeout)
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => BackendHealth {
                reachable: response.status().is_success(),
                status: Some(response.status().as_u16()),
                latency_ms,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                BackendHealth {
                    reachable: false,
                    status: None,
                    latency_ms,
                }
            }
        }
    }
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode a 2xx body, or turn the response into `AppError::Backend`
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if self.status.is_success() {
            Ok(serde_json::from_value(self.body)?)
        } else {
            Err(self.into_error())
        }
    }

    pub fn into_error(self) -> AppError {
        AppError::Backend {
            status: self.status,
            message: extract_error_message(self.status, &self.body),
        }
    }
}

/// JSON when possible, otherwise the raw text; empty bodies become `null`
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).trim().to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message` (string or list of strings), then `error`, then a raw
/// string body, then falls back to the status reason.
pub fn extract_error_message(status: StatusCode, body: &Value) -> String {
    let from_field = |value: &Value| -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        }
    };

    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(from_field)
            .or_else(|| map.get("error").and_then(from_field)),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
    .unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Backend error")
            .to_string()
    })
}
