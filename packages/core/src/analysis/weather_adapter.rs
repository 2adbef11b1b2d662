//! Weather Condition Provider Adapter
//!
//! Adapts the WeatherClient to implement the ConditionProvider trait.

use async_trait::async_trait;

use crate::analysis::{
    error::ProviderError,
    provider::{ConditionProvider, ProviderResult},
    types::ConditionSample,
};
use crate::error::AppError;
use crate::services::weather::{CurrentConditions, WeatherClient};

/// Adapter that implements ConditionProvider for WeatherClient.
pub struct WeatherConditionProvider {
    client: WeatherClient,
}

impl WeatherConditionProvider {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

/// Recent rainfall means measurable rain in the current hour or over the
/// previous day.
fn sample_from(conditions: CurrentConditions) -> ConditionSample {
    let recent_rainfall = conditions.rain_1h_mm.unwrap_or(0.0) > 0.0
        || conditions.rain_24h_mm.unwrap_or(0.0) > 0.0;

    ConditionSample {
        temperature: conditions.temperature_celsius,
        humidity: conditions.humidity_percent,
        recent_rainfall,
    }
}

fn map_client_error(err: AppError) -> ProviderError {
    match err {
        AppError::Timeout => ProviderError::Timeout,
        AppError::Network(message) => ProviderError::network(message),
        AppError::Parse(message) => ProviderError::format(message),
        other => ProviderError::network(other.to_string()),
    }
}

#[async_trait]
impl ConditionProvider for WeatherConditionProvider {
    async fn condition_sample(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> ProviderResult<ConditionSample> {
        let conditions = self
            .client
            .fetch_current(latitude, longitude)
            .await
            .map_err(map_client_error)?;

        Ok(sample_from(conditions))
    }

    fn provider_name(&self) -> &str {
        "openweathermap"
    }
}
