//! Authentication endpoints, forwarded to the backend

use super::{record_proxy_request, relay};
use crate::domain::{LoginInput, Profile, RefreshInput, TokenPair};
use crate::error::{AppError, Result};
use crate::middleware::BearerToken;
use crate::server::AppState;
use axum::{
    extract::State,
    http::Method,
    response::Response,
    Extension, Json,
};
use validator::Validate;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Tokens issued", body = TokenPair),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn login(State(state): State<AppState>, Json(input): Json<LoginInput>) -> Result<Response> {
    let input = LoginInput {
        email: input.email.trim().to_string(),
        password: input.password,
    };
    input.validate()?;

    let body = serde_json::to_value(&input)?;
    let response = state
        .backend
        .send(Method::POST, "auth/login", None, None, Some(&body))
        .await?;
    record_proxy_request("auth", &Method::POST, response.status);
    if response.is_success() {
        tracing::info!(email = %input.email, "Login forwarded");
    } else {
        tracing::info!(email = %input.email, status = %response.status, "Login rejected by backend");
    }
    Ok(relay(response))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Auth",
    request_body = RefreshInput,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenPair),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Refresh token rejected")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshInput>,
) -> Result<Response> {
    if input.refresh_token.trim().is_empty() {
        return Err(AppError::BadRequest("refresh_token is required".to_string()));
    }

    let body = serde_json::to_value(&input)?;
    let response = state
        .backend
        .send(Method::POST, "auth/refresh", None, None, Some(&body))
        .await?;
    record_proxy_request("auth", &Method::POST, response.status);
    Ok(relay(response))
}

/// Profile of the caller
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "Caller profile", body = Profile),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn profile(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<Response> {
    let response = state
        .backend
        .send(Method::GET, "auth/profile", Some(&token), None, None)
        .await?;
    record_proxy_request("auth", &Method::GET, response.status);
    Ok(relay(response))
}
