//! Configuration management for Club Portal

use crate::i18n::Locale;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Backend service configuration
    pub backend: BackendConfig,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Client session configuration
    pub session: SessionConfig,
    /// Fallback locale for user-facing messages
    pub default_locale: Locale,
    /// Allowed CORS origins (`*` allows any)
    pub cors_allowed_origins: Vec<String>,
    /// Telemetry configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the relational-database-backed service (e.g., http://api:3000)
    pub url: String,
    /// Timeout applied to every proxied request
    pub timeout_secs: u64,
    /// Fixed timeout for the health check call
    pub health_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
            health_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JwtConfig {
    /// HS256 secret shared with the backend. When unset, bearer tokens are only
    /// checked for shape and the backend remains the authority.
    pub secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Path of the persisted credentials file used by the CLI
    pub store_path: PathBuf,
    /// Refresh tokens this many seconds before they expire
    pub expiry_skew_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: default_session_path(),
            expiry_skew_secs: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "pretty" or "json"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        url::Url::parse(&backend_url).context("Invalid BACKEND_URL")?;

        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            backend: BackendConfig {
                url: backend_url.trim_end_matches('/').to_string(),
                timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("Invalid BACKEND_TIMEOUT_SECS")?,
                health_timeout_ms: env::var("BACKEND_HEALTH_TIMEOUT_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .context("Invalid BACKEND_HEALTH_TIMEOUT_MS")?,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            },
            session: SessionConfig {
                store_path: env::var("SESSION_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_session_path()),
                expiry_skew_secs: env::var("SESSION_EXPIRY_SKEW_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            },
            default_locale: env::var("DEFAULT_LOCALE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            cors_allowed_origins: parse_list(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            backend: BackendConfig::default(),
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            default_locale: Locale::default(),
            cors_allowed_origins: vec!["*".to_string()],
            telemetry: TelemetryConfig::default(),
        }
    }
}

fn default_session_path() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
        .join(".club-portal")
        .join("session.json")
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
