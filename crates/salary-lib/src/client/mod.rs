//! HTTP client for the prediction and analytics service

mod config;
mod envelope;

pub use config::ClientConfig;
pub use envelope::{interpret, is_json_content_type};

use crate::analytics::{AnalyticsQuery, AnalyticsResult, DataSummary};
use crate::backend::{AnalyticsBackend, PredictionBackend};
use crate::error::ClientError;
use crate::models::{PredictionInput, PredictionResult};
use crate::observability::ClientMetrics;
use crate::service_info::{FeatureImportanceReport, ModelInfo, ModelPerformance, ServiceHealth};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const PREDICT: &str = "api/predict";
    pub const ANALYTICS_OVERVIEW: &str = "api/analytics/overview";
    pub const DATA_SUMMARY: &str = "api/analytics/data-summary";
    pub const MODEL_INFO: &str = "api/model/info";
    pub const MODEL_FEATURES: &str = "api/model/features";
    pub const MODEL_PERFORMANCE: &str = "api/analytics/model-performance";
    pub const HEALTH: &str = "health";
}

/// Client for the salary prediction service
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
    metrics: ClientMetrics,
}

impl ServiceClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        let mut base_url = Url::parse(&config.api_url).context("Invalid API URL")?;
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            metrics: ClientMetrics::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::MalformedBody(format!("invalid endpoint path {}: {}", path, e)))
    }

    /// Send a request and interpret the response, recording metrics
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let start = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => envelope::read_response(response).await,
            Err(e) => Err(ClientError::from_send(e)),
        };

        let label = match &outcome {
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        let elapsed = start.elapsed().as_secs_f64();
        self.metrics.observe_request(endpoint, label, elapsed);
        debug!(endpoint = endpoint, outcome = label, elapsed_secs = elapsed, "Request finished");

        outcome
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(endpoint)?;
        let request = self.client.get(url).query(query);
        self.execute(endpoint, request).await
    }

    /// Submit a validated input for inference
    pub async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ClientError> {
        let url = self.url(endpoints::PREDICT)?;
        let request = self.client.post(url).json(input);
        self.execute(endpoints::PREDICT, request).await
    }

    /// Aggregate analytics for a filter state
    pub async fn analytics_overview(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<AnalyticsResult, ClientError> {
        let result: AnalyticsResult = self
            .get(endpoints::ANALYTICS_OVERVIEW, &query.query_pairs())
            .await?;
        result.validate()?;
        Ok(result)
    }

    /// Filter options with per-option counts
    pub async fn data_summary(&self) -> Result<DataSummary, ClientError> {
        self.get(endpoints::DATA_SUMMARY, &[]).await
    }

    pub async fn model_info(&self) -> Result<ModelInfo, ClientError> {
        self.get(endpoints::MODEL_INFO, &[]).await
    }

    /// Ranked feature importance of the loaded model
    pub async fn model_features(&self) -> Result<FeatureImportanceReport, ClientError> {
        self.get(endpoints::MODEL_FEATURES, &[]).await
    }

    /// Evaluation metrics and training data statistics
    pub async fn model_performance(&self) -> Result<ModelPerformance, ClientError> {
        self.get(endpoints::MODEL_PERFORMANCE, &[]).await
    }

    pub async fn health(&self) -> Result<ServiceHealth, ClientError> {
        self.get(endpoints::HEALTH, &[]).await
    }
}

#[async_trait]
impl PredictionBackend for ServiceClient {
    async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ClientError> {
        ServiceClient::predict(self, input).await
    }
}

#[async_trait]
impl AnalyticsBackend for ServiceClient {
    async fn overview(&self, query: &AnalyticsQuery) -> Result<AnalyticsResult, ClientError> {
        self.analytics_overview(query).await
    }

    async fn data_summary(&self) -> Result<DataSummary, ClientError> {
        ServiceClient::data_summary(self).await
    }
}
