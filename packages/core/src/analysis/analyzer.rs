//! Condition Analyzer
//!
//! Pure, deterministic mapping from a weather sample to an activity score
//! and alert level. The score is additive over three independent bands:
//!
//! - humidity:    >=90 -> +40, >=80 -> +30, >=70 -> +20, >=60 -> +10
//! - temperature: 15..=20 °C -> +30 (ideal), else 12..=23 °C -> +15
//! - recent rain: +30
//!
//! Levels: score >= 80 -> high, >= 50 -> medium, else low.

use crate::analysis::types::{AlertLevel, ConditionAssessment, ConditionSample};

/// Minimum score classified as a high alert.
pub const HIGH_THRESHOLD: u8 = 80;
/// Minimum score classified as a medium alert.
pub const MEDIUM_THRESHOLD: u8 = 50;

fn humidity_points(humidity: f64) -> u8 {
    if humidity >= 90.0 {
        40
    } else if humidity >= 80.0 {
        30
    } else if humidity >= 70.0 {
        20
    } else if humidity >= 60.0 {
        10
    } else {
        0
    }
}

fn temperature_points(temperature: f64) -> u8 {
    if (15.0..=20.0).contains(&temperature) {
        30
    } else if (12.0..=23.0).contains(&temperature) {
        15
    } else {
        0
    }
}

/// Activity score in [0, 100] for one sample.
pub fn activity_score(sample: &ConditionSample) -> u8 {
    let rain_points = if sample.recent_rainfall { 30 } else { 0 };
    humidity_points(sample.humidity) + temperature_points(sample.temperature) + rain_points
}

/// Alert level for a given score.
pub fn level_for_score(score: u8) -> AlertLevel {
    if score >= HIGH_THRESHOLD {
        AlertLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        AlertLevel::Medium
    } else {
        AlertLevel::Low
    }
}

/// Fixed advisory message shown for each level.
pub fn message_for_level(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::High => {
            "Ideal conditions for snails! Recent rain and high humidity are drawing them out. Stay very vigilant."
        }
        AlertLevel::Medium => {
            "Conditions favorable to snails. The recent weather could encourage their activity. Stay watchful."
        }
        AlertLevel::Low => {
            "Little chance of encountering snails. Conditions are not right for them to come out."
        }
    }
}

/// Full assessment for one sample.
pub fn assess(sample: &ConditionSample) -> ConditionAssessment {
    let score = activity_score(sample);
    let level = level_for_score(score);
    ConditionAssessment {
        score,
        level,
        message: message_for_level(level).to_string(),
    }
}
