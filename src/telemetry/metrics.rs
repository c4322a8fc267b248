//! Prometheus metrics setup and metric definitions

use metrics::{counter, describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, BuildError> {
    // Backend round trips, in seconds
    let buckets = [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

    PrometheusBuilder::new()
        .set_buckets(&buckets)?
        .install_recorder()
}

/// Register metric descriptions so `/metrics` lists HELP/TYPE lines from startup.
pub fn describe_metrics() {
    describe_counter!(
        "club_portal_proxy_requests_total",
        "Requests proxied to the backend, by resource, method and backend status"
    );
    describe_histogram!(
        "club_portal_backend_request_duration_seconds",
        "Backend request duration in seconds"
    );
    describe_counter!(
        "club_portal_token_refresh_total",
        "Token refresh attempts by outcome"
    );

    counter!("club_portal_token_refresh_total", "result" => "success").absolute(0);
    counter!("club_portal_token_refresh_total", "result" => "failure").absolute(0);
}
