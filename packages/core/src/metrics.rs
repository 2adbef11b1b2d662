//! Prometheus metrics registry for Escargot'Alerte.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the scheduler and HTTP middleware.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{Counter, CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total number of monitoring passes (startup pass included).
    pub checks_total: Counter,
    /// Total number of per-location condition-check failures.
    pub location_check_errors_total: Counter,
    /// Current number of active (unexpired) alert records.
    pub active_alerts: Gauge,
    /// Number of locations in the monitored registry.
    pub locations_monitored: Gauge,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated (should not happen in practice).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let checks_total = Counter::with_opts(Opts::new(
            "escargot_alerte_checks_total",
            "Total condition monitoring passes",
        ))?;

        let location_check_errors_total = Counter::with_opts(Opts::new(
            "escargot_alerte_location_check_errors_total",
            "Failed per-location condition checks",
        ))?;

        let active_alerts = Gauge::with_opts(Opts::new(
            "escargot_alerte_active_alerts",
            "Current number of active alert records",
        ))?;

        let locations_monitored = Gauge::with_opts(Opts::new(
            "escargot_alerte_locations_monitored",
            "Number of locations in the monitored registry",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "escargot_alerte_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "escargot_alerte_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        registry.register(Box::new(checks_total.clone()))?;
        registry.register(Box::new(location_check_errors_total.clone()))?;
        registry.register(Box::new(active_alerts.clone()))?;
        registry.register(Box::new(locations_monitored.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            checks_total,
            location_check_errors_total,
            active_alerts,
            locations_monitored,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
