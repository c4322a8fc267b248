//! HTTP middleware for Club Portal
//!
//! - Bearer-token enforcement for proxied routes
//! - Error response localization
//! - Sanitized request tracing spans

pub mod error_response;
pub mod require_auth;
pub mod trace;

pub use error_response::localize_error_response;
pub use require_auth::{require_auth_middleware, AuthMiddlewareState, BearerToken};
pub use trace::SanitizedMakeSpan;
