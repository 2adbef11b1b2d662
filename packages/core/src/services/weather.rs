use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;

/// HTTP client for an OpenWeatherMap-shaped current-conditions API.
#[derive(Clone)]
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl WeatherClient {
    /// `timeout` bounds every request; a timed-out call surfaces as
    /// [`AppError::Timeout`] and is treated as a per-location failure.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {}", err)))?;

        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Current conditions for one point, already converted from the wire shape.
#[derive(Debug, Clone, Copy)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub rain_1h_mm: Option<f64>,
    pub rain_24h_mm: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "24h")]
    last_day: Option<f64>,
}

impl WeatherClient {
    pub async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, AppError> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self.http.get(&url).send().await.map_err(|err| {
            if err.is_timeout() {
                AppError::Timeout
            } else {
                AppError::Network(err.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Weather API returned HTTP {}",
                response.status()
            )));
        }

        let data = response
            .json::<OwmCurrentResponse>()
            .await
            .map_err(|err| AppError::Parse(err.to_string()))?;

        Ok(CurrentConditions {
            temperature_celsius: data.main.temp,
            humidity_percent: data.main.humidity,
            rain_1h_mm: data.rain.as_ref().and_then(|rain| rain.one_hour),
            rain_24h_mm: data.rain.as_ref().and_then(|rain| rain.last_day),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(base_url: String) -> WeatherClient {
        WeatherClient::new(base_url, "test-key".to_string(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetch_current_parses_conditions_with_rain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"main":{"temp":18.5,"humidity":85.0},"rain":{"1h":0.2,"24h":3.5}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let conditions = make_client(server.uri())
            .fetch_current(48.8566, 2.3522)
            .await
            .unwrap();

        assert_eq!(conditions.temperature_celsius, 18.5);
        assert_eq!(conditions.humidity_percent, 85.0);
        assert_eq!(conditions.rain_1h_mm, Some(0.2));
        assert_eq!(conditions.rain_24h_mm, Some(3.5));
    }

    #[tokio::test]
    async fn fetch_current_tolerates_missing_rain_block() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"main":{"temp":25.0,"humidity":40.0}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let conditions = make_client(server.uri())
            .fetch_current(45.764043, 4.835659)
            .await
            .unwrap();

        assert_eq!(conditions.rain_1h_mm, None);
        assert_eq!(conditions.rain_24h_mm, None);
    }

    #[tokio::test]
    async fn fetch_current_sends_coordinates_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "48.856614"))
            .and(query_param("lon", "2.3522219"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"main":{"temp":10.0,"humidity":50.0}}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        make_client(server.uri())
            .fetch_current(48.856614, 2.3522219)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn http_error_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = make_client(server.uri())
            .fetch_current(0.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let err = make_client(server.uri())
            .fetch_current(0.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
