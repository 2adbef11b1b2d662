//! Weather endpoints.
//!
//! Routes:
//! - `GET /weather/current`    — latest condition sample for a point
//! - `GET /weather/conditions` — sample plus snail-activity assessment
//!
//! Samples are resolved through the per-location TTL cache first, then
//! the provider. A provider failure surfaces as 502.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::{
    self,
    types::{ConditionAssessment, ConditionSample},
};
use crate::locations::coordinates_in_range;

use super::SharedState;

#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct QueriedPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct CurrentConditionsResponse {
    pub location: QueriedPoint,
    pub timestamp: DateTime<Utc>,
    pub conditions: ConditionSample,
}

#[derive(Debug, Serialize)]
pub struct ConditionAnalysisResponse {
    pub location: QueriedPoint,
    pub timestamp: DateTime<Utc>,
    pub current_conditions: ConditionSample,
    pub analysis: ConditionAssessment,
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn require_coordinates(
    params: &CoordinatesQuery,
) -> Result<(f64, f64), (StatusCode, Json<Value>)> {
    match (params.lat, params.lon) {
        (Some(lat), Some(lon)) if coordinates_in_range(lat, lon) => Ok((lat, lon)),
        (Some(_), Some(_)) => {
            Err(bad_request("lat must be within [-90, 90] and lon within [-180, 180]"))
        }
        _ => Err(bad_request("lat and lon query parameters are required")),
    }
}

/// Cache-then-provider sample lookup.
async fn resolve_sample(
    state: &SharedState,
    lat: f64,
    lon: f64,
) -> Result<ConditionSample, (StatusCode, Json<Value>)> {
    let now = state.clock.now();

    {
        let cache = state.sample_cache.lock().await;
        if let Some(sample) = cache.get(lat, lon, now) {
            return Ok(sample);
        }
    }

    let sample = state
        .provider
        .condition_sample(lat, lon)
        .await
        .map_err(|err| {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("Weather provider error: {}", err) })),
            )
        })?;

    let mut cache = state.sample_cache.lock().await;
    cache.insert(lat, lon, sample, now);
    Ok(sample)
}

/// `GET /weather/current` — raw sample for the requested point.
pub async fn current_conditions(
    State(state): State<SharedState>,
    Query(params): Query<CoordinatesQuery>,
) -> Result<Json<CurrentConditionsResponse>, (StatusCode, Json<Value>)> {
    let (lat, lon) = require_coordinates(&params)?;
    let conditions = resolve_sample(&state, lat, lon).await?;

    Ok(Json(CurrentConditionsResponse {
        location: QueriedPoint { lat, lon },
        timestamp: state.clock.now(),
        conditions,
    }))
}

/// `GET /weather/conditions` — sample plus activity assessment.
pub async fn condition_analysis(
    State(state): State<SharedState>,
    Query(params): Query<CoordinatesQuery>,
) -> Result<Json<ConditionAnalysisResponse>, (StatusCode, Json<Value>)> {
    let (lat, lon) = require_coordinates(&params)?;
    let current_conditions = resolve_sample(&state, lat, lon).await?;
    let analysis = analysis::assess(&current_conditions);

    Ok(Json(ConditionAnalysisResponse {
        location: QueriedPoint { lat, lon },
        timestamp: state.clock.now(),
        current_conditions,
        analysis,
    }))
}
