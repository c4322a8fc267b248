//! Bearer-token enforcement for proxied routes
//!
//! Requests must carry `Authorization: Bearer <token>`. When the proxy shares
//! the backend's signing secret the token is verified here as well; otherwise
//! the backend stays the authority and rejects bad tokens itself.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::error::localized_response;
use crate::i18n::MessageKey;
use crate::jwt::JwtManager;

/// Shared state for authentication middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    jwt_manager: JwtManager,
}

impl AuthMiddlewareState {
    pub fn new(jwt_manager: JwtManager) -> Self {
        Self { jwt_manager }
    }
}

/// Token of the caller, forwarded to the backend by the handlers
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub async fn require_auth_middleware(
    State(auth_state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(&request) {
        Ok(token) => token,
        Err(key) => return unauthorized_response(key),
    };

    if auth_state.jwt_manager.can_verify() {
        if let Err(e) = auth_state.jwt_manager.verify_access_token(&token) {
            tracing::debug!(error = %e, "Rejected bearer token");
            return unauthorized_response(MessageKey::InvalidToken);
        }
    }

    request.extensions_mut().insert(BearerToken(token));
    next.run(request).await
}

fn extract_bearer(request: &Request<Body>) -> Result<String, MessageKey> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(MessageKey::MissingToken)?;
    let value = header.to_str().map_err(|_| MessageKey::InvalidToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(MessageKey::InvalidToken)?;
    if token.is_empty() {
        return Err(MessageKey::InvalidToken);
    }
    Ok(token.to_string())
}

fn unauthorized_response(key: MessageKey) -> Response {
    localized_response(StatusCode::UNAUTHORIZED, "unauthorized", key, None)
}
