//! Shared helpers for integration tests
//!
//! A wiremock server stands in for the club backend; the gateway router and
//! the client SDK are pointed at it.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use club_portal::backend::BackendClient;
use club_portal::client::ApiClient;
use club_portal::config::{BackendConfig, Config, JwtConfig};
use club_portal::server::{build_router, AppState};
use club_portal::session::{Credentials, MemoryTokenStore};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock club backend
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Accept `refresh_token` and answer with a new pair, exactly `times` times
    pub async fn mock_refresh_success(
        &self,
        refresh_token: &str,
        access_token: &str,
        new_refresh_token: &str,
        delay_ms: u64,
        times: u64,
    ) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(body_json(json!({ "refreshToken": refresh_token })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "accessToken": access_token,
                        "refreshToken": new_refresh_token
                    }))
                    .set_delay(std::time::Duration::from_millis(delay_ms)),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_refresh_failure(&self, delay_ms: u64, times: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Invalid refresh token" }))
                    .set_delay(std::time::Duration::from_millis(delay_ms)),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login(&self, access_token: &str, refresh_token: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": access_token,
                "refreshToken": refresh_token
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_profile(&self, token: &str) {
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(wiremock::matchers::bearer_token(token))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .mount(&self.server)
            .await;
    }

    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }
}

pub fn profile_json() -> Value {
    json!({
        "id": 7,
        "email": "tesoreria@club.example",
        "name": "Tesorería",
        "clubId": 1,
        "role": "admin",
        "permissions": ["members:write"]
    })
}

pub fn member_json(id: i64, first_name: &str) -> Value {
    json!({
        "id": id,
        "clubId": 1,
        "firstName": first_name,
        "lastName": "Pérez",
        "documentId": format!("3000000{}", id),
        "status": "active"
    })
}

pub fn test_config(backend_url: &str) -> Config {
    Config {
        backend: BackendConfig {
            url: backend_url.to_string(),
            timeout_secs: 5,
            health_timeout_ms: 500,
        },
        ..Config::default()
    }
}

/// Gateway router proxying to `backend_url`
pub fn test_app(backend_url: &str, jwt_secret: Option<&str>) -> Router {
    let mut config = test_config(backend_url);
    config.jwt = JwtConfig {
        secret: jwt_secret.map(str::to_string),
    };
    let state = AppState::new(config, None).expect("app state");
    build_router(state)
}

/// SDK client with an in-memory session holding `credentials`
pub fn test_client(
    backend_url: &str,
    credentials: Option<Credentials>,
) -> (ApiClient<Arc<MemoryTokenStore>>, Arc<MemoryTokenStore>) {
    let config = test_config(backend_url);
    let backend = BackendClient::new(&config.backend).expect("backend client");
    let store = Arc::new(match credentials {
        Some(credentials) => MemoryTokenStore::with_credentials(credentials),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::new(backend, store.clone(), config.session.expiry_skew_secs);
    (client, store)
}

pub fn credentials(access_token: &str, refresh_token: &str) -> Credentials {
    Credentials {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    }
}

/// HS256 token with the given lifetime (negative for already expired)
pub fn jwt_with_ttl(secret: &str, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": 7,
        "email": "tesoreria@club.example",
        "iat": now,
        "exp": now + ttl_secs
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token")
}

/// Send a request through the router and decode the JSON body (Null if empty)
pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };
    (status, body)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
