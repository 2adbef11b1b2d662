//! Condition monitoring scheduler.
//!
//! Drives the main monitor loop: each tick fetches a condition sample for
//! every registered location, runs the analyzer, and reconciles the alert
//! store — so the API layer always reflects current conditions.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::RwLock;
use tokio::time::{self, MissedTickBehavior};

use crate::analysis::{self, ConditionProvider};
use crate::clock::Clock;
use crate::locations::Location;
use crate::metrics::AppMetrics;
use crate::store::{AlertStore, ReconcileOutcome};

/// Run the condition monitoring loop.
///
/// The first pass happens immediately on startup, then one pass per
/// `check_interval_seconds`. A pass that outlives the interval (the
/// provider call may stall on network I/O) causes the next tick to be
/// skipped rather than queued, so passes never overlap.
///
/// A failure for one location is logged and never aborts the remaining
/// locations or the loop.
///
/// Runs until `Ctrl+C` (SIGINT) is received.
pub async fn run_condition_monitoring(
    provider: Arc<dyn ConditionProvider + Send + Sync>,
    store: Arc<RwLock<AlertStore>>,
    locations: Arc<Vec<Location>>,
    clock: Arc<dyn Clock + Send + Sync>,
    metrics: Arc<AppMetrics>,
    check_interval_seconds: u64,
) {
    let mut interval = time::interval(Duration::from_secs(check_interval_seconds));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        "Condition monitoring started ({} locations, interval: {}s)",
        locations.len(),
        check_interval_seconds
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                check_all_locations(&provider, &store, &locations, &clock, &metrics).await;
            }

            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received. Stopping monitoring.");
                break;
            }
        }
    }

    tracing::info!("Condition monitoring stopped cleanly");
}

/// Execute a single monitoring pass over every registered location.
/// Public so tests (and any manual trigger) can drive ticks directly.
pub async fn check_all_locations(
    provider: &Arc<dyn ConditionProvider + Send + Sync>,
    store: &Arc<RwLock<AlertStore>>,
    locations: &[Location],
    clock: &Arc<dyn Clock + Send + Sync>,
    metrics: &Arc<AppMetrics>,
) {
    tracing::debug!("Checking conditions for {} locations", locations.len());
    metrics.checks_total.inc();

    for location in locations {
        if let Err(err) = check_location(provider, store, clock, location).await {
            metrics.location_check_errors_total.inc();
            tracing::error!(
                "Condition check failed for {} — skipping this tick: {}",
                location.name,
                err
            );
        }
    }

    let active = {
        let store = store.read().await;
        store.active(clock.now()).len()
    };
    metrics.active_alerts.set(active as f64);
    tracing::info!("Monitoring pass complete. {} active alerts.", active);
}

/// Evaluate one location and reconcile the store.
async fn check_location(
    provider: &Arc<dyn ConditionProvider + Send + Sync>,
    store: &Arc<RwLock<AlertStore>>,
    clock: &Arc<dyn Clock + Send + Sync>,
    location: &Location,
) -> Result<(), analysis::ProviderError> {
    let sample = provider
        .condition_sample(location.latitude, location.longitude)
        .await?;
    let assessment = analysis::assess(&sample);

    let outcome = {
        let mut store = store.write().await;
        store.reconcile(location, &assessment, clock.now())
    };

    match outcome {
        ReconcileOutcome::Raised => {
            tracing::info!(
                "New alert for {} (level: {}, score: {})",
                location.name,
                assessment.level,
                assessment.score
            );
        }
        ReconcileOutcome::Refreshed => {
            tracing::info!(
                "Alert refreshed for {} (level: {}, score: {})",
                location.name,
                assessment.level,
                assessment.score
            );
        }
        ReconcileOutcome::Cleared => {
            tracing::info!("Alert cleared for {}", location.name);
        }
        ReconcileOutcome::Quiet => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::analysis::types::ConditionSample;
    use crate::analysis::ProviderError;
    use crate::clock::ManualClock;
    use crate::locations::monitored_locations;
    use crate::services::mock_weather::MockWeatherProvider;

    fn high_sample() -> ConditionSample {
        ConditionSample {
            temperature: 17.0,
            humidity: 95.0,
            recent_rainfall: true,
        }
    }

    fn low_sample() -> ConditionSample {
        ConditionSample {
            temperature: 5.0,
            humidity: 30.0,
            recent_rainfall: false,
        }
    }

    fn make_shared_store() -> Arc<RwLock<AlertStore>> {
        Arc::new(RwLock::new(AlertStore::new()))
    }

    fn make_clock() -> Arc<dyn Clock + Send + Sync> {
        Arc::new(ManualClock::new(Utc::now()))
    }

    fn make_metrics() -> Arc<AppMetrics> {
        Arc::new(AppMetrics::new().unwrap())
    }

    #[tokio::test]
    async fn pass_raises_alerts_for_every_location() {
        let provider: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(high_sample()));
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;

        assert_eq!(store.read().await.len(), 4);
        assert_eq!(store.read().await.active(clock.now()).len(), 4);
    }

    #[tokio::test]
    async fn low_conditions_store_nothing() {
        let provider: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(low_sample()));
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;

        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn one_failing_location_does_not_abort_the_rest() {
        let locations = monitored_locations();
        let paris = &locations[0];
        let provider: Arc<dyn ConditionProvider + Send + Sync> = Arc::new(
            MockWeatherProvider::new()
                .with_default_sample(high_sample())
                .failing_at(paris.latitude, paris.longitude),
        );
        let store = make_shared_store();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;

        assert_eq!(store.read().await.len(), 3);
        assert!(store
            .read()
            .await
            .get_at(paris.latitude, paris.longitude)
            .is_none());
        assert!((metrics.location_check_errors_total.get() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn provider_outage_leaves_store_untouched() {
        let provider: Arc<dyn ConditionProvider + Send + Sync> = Arc::new(
            MockWeatherProvider::new().with_error(ProviderError::ServiceUnavailable),
        );
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;

        assert!(store.read().await.is_empty());
        assert!((metrics.location_check_errors_total.get() - 4.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn conditions_dropping_to_low_clear_previous_alerts() {
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        let wet: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(high_sample()));
        check_all_locations(&wet, &store, &locations, &clock, &metrics).await;
        assert_eq!(store.read().await.len(), 4);

        let dry: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(low_sample()));
        check_all_locations(&dry, &store, &locations, &clock, &metrics).await;
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn two_passes_preserve_record_identity() {
        let provider: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(high_sample()));
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;
        let paris = &locations[0];
        let first_id = store
            .read()
            .await
            .get_at(paris.latitude, paris.longitude)
            .unwrap()
            .id
            .clone();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;
        let second_id = store
            .read()
            .await
            .get_at(paris.latitude, paris.longitude)
            .unwrap()
            .id
            .clone();

        assert_eq!(first_id, second_id);
        assert_eq!(store.read().await.len(), 4);
    }

    #[tokio::test]
    async fn active_alert_gauge_tracks_store_size() {
        let provider: Arc<dyn ConditionProvider + Send + Sync> =
            Arc::new(MockWeatherProvider::new().with_default_sample(high_sample()));
        let store = make_shared_store();
        let locations = monitored_locations();
        let clock = make_clock();
        let metrics = make_metrics();

        check_all_locations(&provider, &store, &locations, &clock, &metrics).await;

        assert!((metrics.active_alerts.get() - 4.0).abs() < f64::EPSILON);
        assert!((metrics.checks_total.get() - 1.0).abs() < f64::EPSILON);
    }
}
