use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: inventories saved successfully.
pub const SAVES_TOTAL: &str = "rategrid_saves_total";

/// Counter: save attempts failed at the storage boundary.
pub const SAVE_FAILURES_TOTAL: &str = "rategrid_save_failures_total";

/// Histogram: save latency in seconds (storage call only).
pub const SAVE_DURATION_SECONDS: &str = "rategrid_save_duration_seconds";

/// Counter: save attempts stopped by validation.
pub const VALIDATION_FAILURES_TOTAL: &str = "rategrid_validation_failures_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: open configuration sessions.
pub const SESSIONS_ACTIVE: &str = "rategrid_sessions_active";

/// Counter: calendar CSV rows imported.
pub const CSV_ROWS_IMPORTED_TOTAL: &str = "rategrid_csv_rows_imported_total";

/// Counter: calendar CSV rows dropped by lenient parsing.
pub const CSV_ROWS_DROPPED_TOTAL: &str = "rategrid_csv_rows_dropped_total";

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
