//! Club Portal - club management gateway
//!
//! This crate fronts the club backend service: an HTTP proxy that validates
//! and forwards dashboard requests, and a client SDK whose session refreshes
//! expired tokens once for any number of concurrent callers.

pub mod api;
pub mod backend;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod jwt;
pub mod middleware;
pub mod openapi;
pub mod server;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
