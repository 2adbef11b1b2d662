//! Condition Provider Interface
//!
//! Abstraction over weather data sources so the monitor does not depend
//! on any concrete API.

use async_trait::async_trait;

use crate::analysis::{error::ProviderError, types::ConditionSample};

/// Trait for weather collaborators supplying condition samples.
#[async_trait]
pub trait ConditionProvider {
    /// Fetch the current condition sample for the given coordinates.
    async fn condition_sample(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ConditionSample, ProviderError>;

    /// Name of this provider for logging/debugging.
    fn provider_name(&self) -> &str;

    /// Check if the provider is currently available.
    async fn health_check(&self) -> Result<(), ProviderError> {
        // Default implementation - just try to fetch a sample for a
        // known-good point.
        self.condition_sample(0.0, 0.0).await.map(|_| ())
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
