//! HTTP server setup

use crate::api;
use crate::backend::BackendClient;
use crate::config::Config;
use crate::domain::{
    Activity, Club, Member, Payment, Permission, Property, Role, Sponsor, User,
};
use crate::jwt::JwtManager;
use crate::middleware::{
    localize_error_response, require_auth_middleware, AuthMiddlewareState, SanitizedMakeSpan,
};
use crate::openapi::ApiDoc;
use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: BackendClient,
    pub jwt_manager: JwtManager,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: Config, metrics_handle: Option<PrometheusHandle>) -> crate::error::Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let jwt_manager = JwtManager::new(config.jwt.clone());
        Ok(Self {
            config: Arc::new(config),
            backend,
            jwt_manager,
            metrics_handle,
        })
    }
}

/// Run the proxy server
pub async fn run(config: Config, metrics_handle: Option<PrometheusHandle>) -> Result<()> {
    info!("Starting Club Portal API gateway");
    info!(backend = %config.backend.url, "Proxying to backend");
    if config.jwt.secret.is_none() {
        info!("JWT_SECRET not set, bearer tokens are verified by the backend only");
    }

    let http_addr = config.http_addr();
    let state = AppState::new(config, metrics_handle)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    let auth_state = AuthMiddlewareState::new(state.jwt_manager.clone());
    let default_locale = state.config.default_locale;
    let request_timeout = Duration::from_secs(state.config.backend.timeout_secs + 5);
    let cors = cors_layer(&state.config.cors_allowed_origins);

    // Routes that need `Authorization: Bearer <token>`
    let protected = Router::new()
        .route("/api/auth/profile", get(api::auth::profile))
        .merge(api::resource::routes::<Club>())
        .merge(api::resource::routes::<User>())
        .merge(api::resource::routes::<Member>())
        .merge(api::resource::routes::<Sponsor>())
        .merge(api::resource::routes::<Payment>())
        .merge(api::resource::routes::<Role>())
        .merge(api::resource::routes::<Permission>())
        .merge(api::resource::routes::<Property>())
        .merge(api::resource::routes::<Activity>())
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_auth_middleware,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        .route("/metrics", get(api::metrics::metrics_handler))
        // Auth endpoints
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/refresh", post(api::auth::refresh))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::build()))
        // Add middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(axum::middleware::from_fn_with_state(
            default_locale,
            localize_error_response,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
