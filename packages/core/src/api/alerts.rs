//! Alert endpoints.
//!
//! Routes:
//! - `GET    /alerts`       — active alerts, radius-filtered when a center is given
//! - `POST   /alerts`       — user-submitted alert report
//! - `DELETE /alerts/:id`   — remove a record by id
//!
//! Coordinate and level validation happens here, before anything reaches
//! the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analysis::types::{AlertLevel, AlertRecord, ConditionAssessment};
use crate::locations::{coordinates_in_range, Location};

use super::SharedState;

/// Radius applied when the query gives a center but no radius, in km.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

// ---- Request shapes ----

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportAlertRequest {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub level: String,
    pub score: Option<u8>,
    pub message: Option<String>,
}

// ---- Helpers ----

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.into() })))
}

const COORDINATE_RANGE_ERROR: &str =
    "lat must be within [-90, 90] and lon within [-180, 180]";

// ---- Handlers ----

/// `GET /alerts` — list active alerts.
///
/// With `lat`/`lon`, results are filtered to `radius_km` (default 10 km)
/// around the center via great-circle distance.
pub async fn list_alerts(
    State(state): State<SharedState>,
    Query(params): Query<AlertsQuery>,
) -> Result<Json<Vec<AlertRecord>>, (StatusCode, Json<Value>)> {
    let now = state.clock.now();

    match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => {
            if !coordinates_in_range(lat, lon) {
                return Err(bad_request(COORDINATE_RANGE_ERROR));
            }
            let radius_km = params.radius_km.unwrap_or(DEFAULT_RADIUS_KM);
            if !radius_km.is_finite() || radius_km < 0.0 {
                return Err(bad_request("radius_km must be a non-negative number"));
            }

            let store = state.store.read().await;
            Ok(Json(store.within_radius(lat, lon, radius_km, now)))
        }
        (None, None) => {
            let store = state.store.read().await;
            Ok(Json(store.active(now)))
        }
        _ => Err(bad_request("lat and lon must be provided together")),
    }
}

/// `POST /alerts` — store a user-submitted report.
///
/// Reports feed the same store as the monitor, under the same
/// one-record-per-location invariant. Low-level reports are rejected:
/// the store never holds a low record.
pub async fn report_alert(
    State(state): State<SharedState>,
    Json(body): Json<ReportAlertRequest>,
) -> Result<(StatusCode, Json<AlertRecord>), (StatusCode, Json<Value>)> {
    if !coordinates_in_range(body.lat, body.lon) {
        return Err(bad_request(COORDINATE_RANGE_ERROR));
    }

    let level: AlertLevel = body
        .level
        .parse()
        .map_err(|_| {
            bad_request(format!(
                "Invalid level '{}'. Must be one of: low, medium, high",
                body.level
            ))
        })?;
    if level == AlertLevel::Low {
        return Err(bad_request("Low-level reports are never stored"));
    }

    let score = body.score.unwrap_or_else(|| level.floor_score());
    if score > 100 {
        return Err(bad_request("score must be within [0, 100]"));
    }

    let assessment = ConditionAssessment {
        score,
        level,
        message: body
            .message
            .unwrap_or_else(|| "Snails reported in the area".to_string()),
    };
    let location = Location::new(
        body.name.unwrap_or_else(|| "User report".to_string()),
        body.lat,
        body.lon,
    );

    let now = state.clock.now();
    let record = {
        let mut store = state.store.write().await;
        store.reconcile(&location, &assessment, now);
        store.get_at(body.lat, body.lon).cloned()
    };

    match record {
        Some(record) => Ok((StatusCode::CREATED, Json(record))),
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Report was not stored" })),
        )),
    }
}

/// `DELETE /alerts/:id` — remove a record by id.
pub async fn delete_alert(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let removed = {
        let mut store = state.store.write().await;
        store.remove_by_id(&id)
    };

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Alert not found" })),
        ))
    }
}
