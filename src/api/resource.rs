//! Generic CRUD proxy for the club-management entities
//!
//! One set of handlers serves every [`Resource`]: bodies are validated
//! against the entity's input types, then forwarded with the caller's
//! bearer token. The backend's answer is relayed unchanged.

use super::{record_resource_request, relay};
use crate::backend::BackendResponse;
use crate::domain::{EntityId, Resource};
use crate::error::Result;
use crate::middleware::BearerToken;
use crate::server::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;
use validator::Validate;

/// Routes for `/api/{kind}` and `/api/{kind}/{id}`
pub fn routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/api/{}", R::KIND.path());
    let item = format!("{}/{{id}}", collection);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(get_one::<R>)
                .put(update::<R>)
                .patch(update::<R>)
                .delete(delete::<R>),
        )
}

fn item_path<R: Resource>(id: EntityId) -> String {
    format!("{}/{}", R::KIND.path(), id)
}

async fn forward<R: Resource>(
    state: &AppState,
    method: Method,
    path: &str,
    token: &str,
    query: Option<&str>,
    body: Option<&Value>,
) -> Result<Response> {
    let response: BackendResponse = state
        .backend
        .send(method.clone(), path, Some(token), query, body)
        .await?;
    record_resource_request(R::KIND, &method, response.status);
    if !response.is_success() {
        tracing::debug!(
            resource = %R::KIND,
            method = %method,
            status = %response.status,
            "Backend rejected request"
        );
    }
    Ok(relay(response))
}

/// List records; the query string is forwarded untouched
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    forward::<R>(
        &state,
        Method::GET,
        R::KIND.path(),
        &token,
        query.as_deref(),
        None,
    )
    .await
}

pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(id): Path<EntityId>,
) -> Result<Response> {
    forward::<R>(&state, Method::GET, &item_path::<R>(id), &token, None, None).await
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Json(input): Json<R::Create>,
) -> Result<Response> {
    input.validate()?;
    let body = serde_json::to_value(&input)?;
    forward::<R>(
        &state,
        Method::POST,
        R::KIND.path(),
        &token,
        None,
        Some(&body),
    )
    .await
}

/// PUT and PATCH share the partial-update input; the method is kept as sent
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    method: Method,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(id): Path<EntityId>,
    Json(input): Json<R::Update>,
) -> Result<Response> {
    input.validate()?;
    let body = serde_json::to_value(&input)?;
    forward::<R>(
        &state,
        method,
        &item_path::<R>(id),
        &token,
        None,
        Some(&body),
    )
    .await
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Path(id): Path<EntityId>,
) -> Result<Response> {
    forward::<R>(&state, Method::DELETE, &item_path::<R>(id), &token, None, None).await
}
