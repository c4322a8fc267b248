//! JWT token handling
//!
//! Tokens are issued by the backend. The proxy can verify them locally when
//! it shares the backend's HS256 secret; the client only peeks at the
//! expiry claim to refresh ahead of time.

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims the backend puts in its access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: serde_json::Value,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "clubId")]
    pub club_id: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

#[derive(Clone)]
pub struct JwtManager {
    decoding_key: Option<DecodingKey>,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            decoding_key: config
                .secret
                .as_deref()
                .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    /// Whether tokens can be verified locally
    pub fn can_verify(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature and expiry of a backend-issued access token
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims> {
        let key = self.decoding_key.as_ref().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("JWT secret not configured"))
        })?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        let data = decode::<AccessClaims>(token, key, &validation)?;
        Ok(data.claims)
    }
}

/// Read the `exp` claim without verifying the signature.
///
/// Returns `None` for opaque (non-JWT) tokens and for JWTs without `exp`.
pub fn peek_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    Utc.timestamp_opt(data.claims.exp?, 0).single()
}

/// Whether the token expires within `skew_secs` from now
pub fn expires_within(token: &str, skew_secs: i64) -> bool {
    peek_expiry(token)
        .map(|exp| exp <= Utc::now() + chrono::Duration::seconds(skew_secs))
        .unwrap_or(false)
}
