//! Condition Analysis Module
//!
//! This module turns raw weather samples into snail-activity assessments:
//! a banded 0-100 score, an alert level, and the advisory message shown
//! to users.

pub mod analyzer;
pub mod error;
pub mod provider;
pub mod types;
pub mod weather_adapter;

pub use analyzer::assess;
pub use error::ProviderError;
pub use provider::ConditionProvider;
pub use types::*;
