//! Telemetry initialization: metrics and structured logging

pub mod metrics;

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "club_portal=info,tower_http=debug";

/// Initialise logging and, for the server, the Prometheus recorder.
///
/// Returns `Some(PrometheusHandle)` when metrics are enabled and the recorder
/// could be installed, so the HTTP server can expose `/metrics`.
pub fn init(config: &TelemetryConfig, with_metrics: bool) -> Option<PrometheusHandle> {
    init_logging(config, DEFAULT_FILTER);

    if !(with_metrics && config.metrics_enabled) {
        return None;
    }
    match metrics::install_prometheus_recorder() {
        Ok(handle) => {
            metrics::describe_metrics();
            Some(handle)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder not installed, metrics disabled");
            None
        }
    }
}

/// Logs go to stderr; stdout carries CLI output.
fn init_logging(config: &TelemetryConfig, default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        // Keep `message` top-level instead of nested under `fields`
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }
}
