use std::sync::Arc;
use std::time::Duration as StdDuration;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::{Mutex, RwLock};

use escargot_alerte::analysis::weather_adapter::WeatherConditionProvider;
use escargot_alerte::analysis::ConditionProvider;
use escargot_alerte::api::{build_router, ApiState};
use escargot_alerte::cache::{SampleCache, DEFAULT_SAMPLE_TTL_MINUTES};
use escargot_alerte::cli::Cli;
use escargot_alerte::clock::{Clock, SystemClock};
use escargot_alerte::config::Config;
use escargot_alerte::error::AppError;
use escargot_alerte::locations;
use escargot_alerte::logging::init_logging;
use escargot_alerte::metrics::AppMetrics;
use escargot_alerte::scheduler::run_condition_monitoring;
use escargot_alerte::services::weather::WeatherClient;
use escargot_alerte::store::AlertStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()
        .map(|config| config.apply_cli(&cli))
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!("Service started with config: {:?}", config);

    let weather_client = WeatherClient::new(
        config.weather_api_url.clone(),
        config.weather_api_key.clone(),
        StdDuration::from_secs(config.provider_timeout_seconds),
    )
    .unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    let provider: Arc<dyn ConditionProvider + Send + Sync> =
        Arc::new(WeatherConditionProvider::new(weather_client));
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let store = Arc::new(RwLock::new(AlertStore::new()));
    let monitored = Arc::new(locations::monitored_locations());

    let metrics = Arc::new(AppMetrics::new().unwrap_or_else(|err| {
        tracing::error!("Failed to build metrics registry: {}", err);
        std::process::exit(1);
    }));
    metrics.locations_monitored.set(monitored.len() as f64);

    let sample_cache = Arc::new(Mutex::new(SampleCache::new(chrono::Duration::minutes(
        DEFAULT_SAMPLE_TTL_MINUTES,
    ))));

    let state = Arc::new(ApiState {
        store: store.clone(),
        provider: provider.clone(),
        sample_cache,
        clock: clock.clone(),
        metrics: metrics.clone(),
    });
    let app = build_router(state);

    tokio::spawn(run_condition_monitoring(
        provider,
        store,
        monitored,
        clock,
        metrics,
        config.check_interval_seconds,
    ));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        });
    tracing::info!("HTTP server listening on {}", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", err);
        std::process::exit(1);
    }
}
