//! Service seams used by the session state machines
//!
//! [`crate::client::ServiceClient`] implements both traits over HTTP; tests
//! substitute in-memory backends.

use crate::analytics::{AnalyticsQuery, AnalyticsResult, DataSummary};
use crate::error::ClientError;
use crate::models::{PredictionInput, PredictionResult};
use async_trait::async_trait;

#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Single attempt, no retry
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ClientError>;
}

#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    async fn overview(&self, query: &AnalyticsQuery) -> Result<AnalyticsResult, ClientError>;

    async fn data_summary(&self) -> Result<DataSummary, ClientError>;
}
