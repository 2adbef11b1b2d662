//! Per-location TTL cache for condition samples.
//!
//! The weather read endpoints hit this before the provider, so repeated
//! queries for the same point inside the TTL do not re-hit the weather
//! API. Freshness is judged against an injected `now` so tests never
//! sleep. The monitor loop bypasses this cache — it always evaluates
//! fresh samples.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::analysis::types::ConditionSample;
use crate::locations::CoordinateKey;

/// Default freshness window for cached samples.
pub const DEFAULT_SAMPLE_TTL_MINUTES: i64 = 10;

struct CachedSample {
    sample: ConditionSample,
    cached_at: DateTime<Utc>,
}

/// TTL cache of the latest sample per coordinate pair.
pub struct SampleCache {
    ttl: Duration,
    entries: HashMap<CoordinateKey, CachedSample>,
}

impl SampleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached sample only when still within TTL at `now`.
    pub fn get(&self, latitude: f64, longitude: f64, now: DateTime<Utc>) -> Option<ConditionSample> {
        self.entries
            .get(&CoordinateKey::new(latitude, longitude))
            .filter(|entry| now - entry.cached_at <= self.ttl)
            .map(|entry| entry.sample)
    }

    pub fn insert(
        &mut self,
        latitude: f64,
        longitude: f64,
        sample: ConditionSample,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(
            CoordinateKey::new(latitude, longitude),
            CachedSample {
                sample,
                cached_at: now,
            },
        );
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
