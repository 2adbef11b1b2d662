use std::env;

use crate::cli::Cli;

const DEFAULT_CHECK_INTERVAL_SECONDS: u64 = 3600;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub weather_api_url: String,
    pub weather_api_key: String,
    pub check_interval_seconds: u64,
    pub provider_timeout_seconds: u64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let weather_api_url =
            env::var("WEATHER_API_URL").map_err(|_| "WEATHER_API_URL is required")?;

        let weather_api_key =
            env::var("WEATHER_API_KEY").map_err(|_| "WEATHER_API_KEY is required")?;

        let check_interval_seconds = match env::var("CHECK_INTERVAL_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| "CHECK_INTERVAL_SECONDS must be a valid number")?,
            Err(_) => DEFAULT_CHECK_INTERVAL_SECONDS,
        };
        if check_interval_seconds == 0 {
            return Err("CHECK_INTERVAL_SECONDS must be greater than zero".to_string());
        }

        let provider_timeout_seconds = match env::var("PROVIDER_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| "PROVIDER_TIMEOUT_SECONDS must be a valid number")?,
            Err(_) => DEFAULT_PROVIDER_TIMEOUT_SECONDS,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| "PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            weather_api_url,
            weather_api_key,
            check_interval_seconds,
            provider_timeout_seconds,
            port,
        })
    }

    /// CLI flags take precedence over the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.weather_url {
            self.weather_api_url = url.clone();
        }
        if let Some(interval) = cli.check_interval {
            self.check_interval_seconds = interval;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        self
    }
}
