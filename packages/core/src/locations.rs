//! Monitored locations and coordinate validation.
//!
//! The registry is fixed at process start: the monitor evaluates exactly
//! these zones each tick. Coordinates arriving from the HTTP boundary are
//! range-checked here before they reach the core.

use serde::{Deserialize, Serialize};

/// A named geographic point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Hashable identity of a coordinate pair. The alert store and the sample
/// cache both key on this: the invariant is one record per distinct pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey(u64, u64);

impl CoordinateKey {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(latitude.to_bits(), longitude.to_bits())
    }
}

impl From<&Location> for CoordinateKey {
    fn from(location: &Location) -> Self {
        Self::new(location.latitude, location.longitude)
    }
}

/// `true` when both coordinates are inside their valid degree ranges.
pub fn coordinates_in_range(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// The zones evaluated by the monitor loop.
pub fn monitored_locations() -> Vec<Location> {
    vec![
        Location::new("Paris", 48.856614, 2.3522219),
        Location::new("Lyon", 45.764043, 4.835659),
        Location::new("Marseille", 43.296482, 5.36978),
        Location::new("Bordeaux", 44.837789, -0.57918),
    ]
}
