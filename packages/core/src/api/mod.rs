//! HTTP query surface.
//!
//! Thin axum wrapper over the alert store and the condition provider.
//! All handlers read through [`ApiState`]; only the user-report endpoint
//! writes. Router assembly lives here so `main.rs` and the integration
//! tests wire the exact same app.

pub mod alerts;
pub mod health;
pub mod weather;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
    Router,
};
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;

use crate::analysis::ConditionProvider;
use crate::cache::SampleCache;
use crate::clock::Clock;
use crate::metrics::AppMetrics;
use crate::store::AlertStore;

/// Everything the handlers need, shared with the monitor task.
pub struct ApiState {
    pub store: Arc<RwLock<AlertStore>>,
    pub provider: Arc<dyn ConditionProvider + Send + Sync>,
    pub sample_cache: Arc<Mutex<SampleCache>>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub metrics: Arc<AppMetrics>,
}

/// Shared state type for all routes.
pub type SharedState = Arc<ApiState>;

/// Assemble the full application router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/alerts",
            get(alerts::list_alerts).post(alerts::report_alert),
        )
        .route("/alerts/:id", delete(alerts::delete_alert))
        .route("/weather/current", get(weather::current_conditions))
        .route("/weather/conditions", get(weather::condition_analysis))
        .route("/metrics", get(export_metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_http_metrics,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `GET /metrics` — Prometheus text exposition.
async fn export_metrics(State(state): State<SharedState>) -> Response {
    match state.metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .expect("metrics response should be valid"),
        Err(err) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from(format!("Failed to encode metrics: {}", err)))
            .expect("metrics error response should be valid"),
    }
}

/// Record request count and latency for every route.
async fn track_http_metrics(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    state
        .metrics
        .http_requests_total
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();
    state
        .metrics
        .http_request_duration
        .observe(start.elapsed().as_secs_f64());

    response
}
