use std::net::SocketAddr;

use crate::wire::Request;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total requests handled. Labels: op, status.
pub const REQUESTS_TOTAL: &str = "varaus_requests_total";

/// Histogram: request latency in seconds. Labels: op.
pub const REQUEST_DURATION_SECONDS: &str = "varaus_request_duration_seconds";

/// Counter: admission rejections. Labels: kind.
pub const REJECTIONS_TOTAL: &str = "varaus_rejections_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "varaus_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "varaus_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "varaus_connections_rejected_total";

/// Gauge: reservations currently held across all rooms.
pub const RESERVATIONS_ACTIVE: &str = "varaus_reservations_active";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a Request variant to a short label for metrics.
pub fn op_label(request: &Request) -> &'static str {
    match request {
        Request::ListRooms => "list_rooms",
        Request::Create { .. } => "create",
        Request::Cancel { .. } => "cancel",
        Request::List { .. } => "list",
    }
}
