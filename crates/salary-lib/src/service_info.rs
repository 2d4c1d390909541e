//! Service health, model metadata and evaluation payloads
//!
//! Consumed by tooling only; the prediction path never depends on them.

use crate::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Availability of one backend service as reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    Available,
    Unavailable,
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Available => "available",
            ServiceStatus::Unavailable => "unavailable",
            ServiceStatus::Unknown => "unknown",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ServiceStatus::Available)
    }
}

impl From<String> for ServiceStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "available" | "healthy" | "ok" => ServiceStatus::Available,
            "unavailable" | "unhealthy" | "down" => ServiceStatus::Unavailable,
            _ => ServiceStatus::Unknown,
        }
    }
}

impl From<ServiceStatus> for String {
    fn from(value: ServiceStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, alias = "modelLoaded", deserialize_with = "null_as_default")]
    pub model_loaded: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, ServiceStatus>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// Healthy and able to serve live predictions
    pub fn can_predict(&self) -> bool {
        self.is_healthy()
            && self.model_loaded
            && self
                .services
                .get("prediction")
                .map_or(true, ServiceStatus::is_available)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureImportance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub importance: f64,
}

/// Payload of `GET /api/model/info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub training_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_loaded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_scaler: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub n_estimators: Option<u64>,
    #[serde(default)]
    pub max_depth: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_features: Vec<FeatureImportance>,
}

/// One entry of a ranked feature importance list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedFeature {
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub importance: f64,
    /// Importance as a percentage, when the service reports it
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Payload of `GET /api/model/features`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureImportanceReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_importance: Vec<RankedFeature>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_features: u64,
}

impl FeatureImportanceReport {
    /// The `n` most important features, highest first
    pub fn top(&self, n: usize) -> Vec<&RankedFeature> {
        let mut ranked: Vec<&RankedFeature> = self.feature_importance.iter().collect();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    #[serde(default)]
    pub r2_score: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub rmse: Option<f64>,
    /// Mean absolute percentage error, already in percent
    #[serde(default)]
    pub mape: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationScores {
    #[serde(default)]
    pub cross_validation_mean: Option<f64>,
    #[serde(default)]
    pub cross_validation_std: Option<f64>,
    #[serde(default)]
    pub train_score: Option<f64>,
    #[serde(default)]
    pub test_score: Option<f64>,
}

/// Training set statistics reported alongside model performance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingDataQuality {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_samples: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features_count: u64,
    #[serde(default)]
    pub missing_data_percentage: Option<f64>,
    #[serde(default)]
    pub outliers_percentage: Option<f64>,
}

/// Payload of `GET /api/analytics/model-performance`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPerformance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub accuracy: AccuracyMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_importance: Vec<RankedFeature>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation_scores: ValidationScores,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_quality: TrainingDataQuality,
}

impl ModelPerformance {
    /// Gap between train and test score; a large value suggests overfitting
    pub fn generalization_gap(&self) -> Option<f64> {
        let scores = &self.validation_scores;
        Some(scores.train_score? - scores.test_score?)
    }
}
