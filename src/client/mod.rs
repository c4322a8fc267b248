//! Authorized API client
//!
//! Wraps the backend client with the session: every request carries the
//! current bearer token, and a 401 triggers one refresh and one replay.

pub mod resource;

pub use resource::{ResourceClient, ResourceCollection};

use crate::backend::{BackendClient, BackendHealth, BackendResponse};
use crate::config::Config;
use crate::domain::{LoginInput, Profile};
use crate::error::{AppError, Result};
use crate::session::{FileTokenStore, SessionManager, TokenStore};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

/// Client used by dashboards and the CLI
pub struct ApiClient<S: TokenStore = FileTokenStore> {
    backend: BackendClient,
    session: Arc<SessionManager<S>>,
}

impl<S: TokenStore> Clone for ApiClient<S> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            session: self.session.clone(),
        }
    }
}

impl ApiClient<FileTokenStore> {
    /// Client persisting its session in the configured session file
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let store = FileTokenStore::new(config.session.store_path.clone());
        Ok(Self::new(backend, store, config.session.expiry_skew_secs))
    }
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(backend: BackendClient, store: S, expiry_skew_secs: i64) -> Self {
        let session = Arc::new(SessionManager::new(backend.clone(), store, expiry_skew_secs));
        Self { backend, session }
    }

    pub fn session(&self) -> &SessionManager<S> {
        &self.session
    }

    /// Sign in and start a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile> {
        let input = LoginInput {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        input.validate()?;

        let tokens = self.backend.login(&input).await.map_err(|e| match e {
            AppError::Backend { status, .. } if status == StatusCode::UNAUTHORIZED => {
                AppError::InvalidCredentials
            }
            other => other,
        })?;
        self.session.establish(tokens).await?;
        tracing::info!(email = %input.email, "Signed in");

        self.profile().await
    }

    /// End the session
    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.request(Method::GET, "auth/profile", None, None).await
    }

    /// Resume a persisted session, validating it against the backend.
    ///
    /// Returns `None` when there is no usable session; stale credentials are
    /// cleared.
    pub async fn restore_session(&self) -> Result<Option<Profile>> {
        if !self.session.restore().await? {
            return Ok(None);
        }
        match self.profile().await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_auth_failure() => {
                tracing::info!("Stored session is no longer valid");
                self.session.clear().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn health(&self) -> BackendHealth {
        self.backend.health().await
    }

    /// Authorized request decoded into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<T> {
        self.send_authorized(method, path, query, body)
            .await?
            .into_result()
    }

    /// Authorized request with retry-once on 401.
    ///
    /// Returns the raw response for any status other than 401.
    pub async fn send_authorized(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<BackendResponse> {
        let token = self.session.access_token().await?;
        let response = self
            .backend
            .send(method.clone(), path, Some(&token), query, body)
            .await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(path = %path, "Request unauthorized, refreshing session");
        let token = self.session.refresh_after_unauthorized(&token).await?;
        let response = self
            .backend
            .send(method, path, Some(&token), query, body)
            .await?;
        if response.status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %path, "Request unauthorized after refresh, clearing session");
            self.session.clear().await?;
            return Err(AppError::SessionExpired);
        }
        Ok(response)
    }
}
