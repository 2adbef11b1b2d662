//! Builder-style mock condition provider for tests.
//!
//! Kept in the library (not behind `#[cfg(test)]`) so scheduler unit
//! tests and the integration suite can share it.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::analysis::{
    error::ProviderError,
    provider::{ConditionProvider, ProviderResult},
    types::ConditionSample,
};
use crate::locations::CoordinateKey;

#[derive(Default)]
pub struct MockWeatherProvider {
    default_sample: Option<ConditionSample>,
    samples: HashMap<CoordinateKey, ConditionSample>,
    failing: HashSet<CoordinateKey>,
    fail_all: Option<ProviderError>,
    calls: AtomicUsize,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample returned for any coordinates without a specific override.
    pub fn with_default_sample(mut self, sample: ConditionSample) -> Self {
        self.default_sample = Some(sample);
        self
    }

    /// Sample returned for one specific coordinate pair.
    pub fn with_sample_at(
        mut self,
        latitude: f64,
        longitude: f64,
        sample: ConditionSample,
    ) -> Self {
        self.samples
            .insert(CoordinateKey::new(latitude, longitude), sample);
        self
    }

    /// Make one specific coordinate pair fail while others succeed.
    pub fn failing_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.failing.insert(CoordinateKey::new(latitude, longitude));
        self
    }

    /// Make every request fail with the given error.
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.fail_all = Some(error);
        self
    }

    /// Number of `condition_sample` calls made against this mock.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConditionProvider for MockWeatherProvider {
    async fn condition_sample(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> ProviderResult<ConditionSample> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.fail_all {
            return Err(error.clone());
        }

        let key = CoordinateKey::new(latitude, longitude);
        if self.failing.contains(&key) {
            return Err(ProviderError::ServiceUnavailable);
        }

        self.samples
            .get(&key)
            .or(self.default_sample.as_ref())
            .copied()
            .ok_or_else(|| {
                ProviderError::format(format!(
                    "No mock sample configured for ({}, {})",
                    latitude, longitude
                ))
            })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
