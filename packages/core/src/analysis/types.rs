//! Core data types for condition analysis

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locations::Location;

/// A single weather sample for one location, produced per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionSample {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity percentage, 0-100.
    pub humidity: f64,
    /// Rainfall observed in the current hour or the previous day.
    pub recent_rainfall: bool,
}

/// Alert classification derived from the activity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    /// Lowest score that maps to this level. Used when a user report
    /// arrives without an explicit score.
    pub fn floor_score(self) -> u8 {
        match self {
            AlertLevel::Low => 0,
            AlertLevel::Medium => 50,
            AlertLevel::High => 80,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Low => write!(f, "low"),
            AlertLevel::Medium => write!(f, "medium"),
            AlertLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for AlertLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(AlertLevel::Low),
            "medium" => Ok(AlertLevel::Medium),
            "high" => Ok(AlertLevel::High),
            other => Err(format!("Invalid alert level: {}", other)),
        }
    }
}

/// Result of analyzing one sample: score, level, and advisory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionAssessment {
    pub score: u8,
    pub level: AlertLevel,
    pub message: String,
}

/// An active snail alert for one location.
///
/// At most one record exists per coordinate pair; `level` is never
/// `Low` (low evaluations remove the record instead of storing it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub location: Location,
    pub level: AlertLevel,
    pub score: u8,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
