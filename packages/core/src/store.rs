//! In-memory alert store.
//!
//! `AlertStore` holds the current `AlertRecord` set, at most one record
//! per coordinate pair. Records expire 6 hours after their last update
//! but are never actively purged: reads filter on `expires_at`, and a
//! stale record is replaced or refreshed the next time its location is
//! reconciled.
//!
//! The store itself is not `Sync` — callers wrap it in
//! `Arc<RwLock<AlertStore>>` so it can be shared between the Tokio
//! monitor task and the Axum handler threads. Only the monitor (and the
//! user-report endpoint) write.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::analysis::types::{AlertLevel, AlertRecord, ConditionAssessment};
use crate::geo;
use crate::locations::{CoordinateKey, Location};

/// How long a record stays active after its last update.
pub const ALERT_TTL_HOURS: i64 = 6;

/// What `reconcile` did for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new record was created.
    Raised,
    /// An existing record was refreshed in place.
    Refreshed,
    /// The evaluation dropped to low and the record was removed.
    Cleared,
    /// Low evaluation, nothing stored.
    Quiet,
}

/// Current alerts, keyed by coordinate pair.
#[derive(Debug, Default)]
pub struct AlertStore {
    records: HashMap<CoordinateKey, AlertRecord>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one evaluation result for a location.
    ///
    /// Medium/high upserts: an existing record keeps its `id` and
    /// `created_at` while level, score, message, `updated_at` and
    /// `expires_at` are refreshed; otherwise a fresh record is minted.
    /// Low removes any existing record — low alerts are never stored.
    pub fn reconcile(
        &mut self,
        location: &Location,
        assessment: &ConditionAssessment,
        now: DateTime<Utc>,
    ) -> ReconcileOutcome {
        let key = CoordinateKey::from(location);

        if assessment.level == AlertLevel::Low {
            return if self.records.remove(&key).is_some() {
                ReconcileOutcome::Cleared
            } else {
                ReconcileOutcome::Quiet
            };
        }

        let expires_at = now + Duration::hours(ALERT_TTL_HOURS);

        match self.records.entry(key) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.level = assessment.level;
                record.score = assessment.score;
                record.message = assessment.message.clone();
                record.updated_at = now;
                record.expires_at = expires_at;
                ReconcileOutcome::Refreshed
            }
            Entry::Vacant(entry) => {
                entry.insert(AlertRecord {
                    id: Uuid::new_v4().to_string(),
                    location: location.clone(),
                    level: assessment.level,
                    score: assessment.score,
                    message: assessment.message.clone(),
                    created_at: now,
                    updated_at: now,
                    expires_at,
                });
                ReconcileOutcome::Raised
            }
        }
    }

    /// All records still active at `now`, sorted by location name.
    /// Does not mutate the store — expired records linger until their
    /// location is reconciled again.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<AlertRecord> {
        let mut records: Vec<AlertRecord> = self
            .records
            .values()
            .filter(|record| record.expires_at > now)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.location.name.cmp(&b.location.name));
        records
    }

    /// Active records within `radius_km` of the given center, nearest
    /// first. Great-circle distance via the haversine formula.
    pub fn within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        now: DateTime<Utc>,
    ) -> Vec<AlertRecord> {
        let mut in_range: Vec<(f64, AlertRecord)> = self
            .active(now)
            .into_iter()
            .map(|record| {
                let distance = geo::distance_km(
                    latitude,
                    longitude,
                    record.location.latitude,
                    record.location.longitude,
                );
                (distance, record)
            })
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();
        in_range.sort_by(|a, b| a.0.total_cmp(&b.0));
        in_range.into_iter().map(|(_, record)| record).collect()
    }

    /// Record for an exact coordinate pair, active or not.
    pub fn get_at(&self, latitude: f64, longitude: f64) -> Option<&AlertRecord> {
        self.records.get(&CoordinateKey::new(latitude, longitude))
    }

    /// Remove a record by id. Returns `false` when no record has that id.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let key = self
            .records
            .iter()
            .find(|(_, record)| record.id == id)
            .map(|(key, _)| *key);
        match key {
            Some(key) => self.records.remove(&key).is_some(),
            None => false,
        }
    }

    /// Number of records currently held, including expired ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove all records from the store.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
