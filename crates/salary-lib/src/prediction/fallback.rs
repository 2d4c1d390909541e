//! Degraded-mode estimate used when the inference service is unreachable

use crate::models::{
    ConfidenceInterval, MarketPosition, PredictionFactor, PredictionMetadata, PredictionResult,
};

/// Placeholder salary shown in degraded mode
pub const FALLBACK_SALARY: f64 = 115_000.0;

/// Mean absolute error of the production model; sets the placeholder interval
pub const MODEL_MAE: f64 = 22_519.0;

pub const DEGRADED_FACTOR_NAME: &str = "Service Unavailable";
pub const FALLBACK_MODEL_VERSION: &str = "fallback";

/// Build the clearly-labelled placeholder prediction.
///
/// Always carries exactly one factor, named [`DEGRADED_FACTOR_NAME`], with
/// zero impact.
pub fn degraded_result() -> PredictionResult {
    PredictionResult {
        predicted_salary: FALLBACK_SALARY,
        confidence_interval: Some(ConfidenceInterval {
            lower: FALLBACK_SALARY - MODEL_MAE,
            upper: FALLBACK_SALARY + MODEL_MAE,
        }),
        similar_jobs: 0,
        market_position: MarketPosition::for_salary(FALLBACK_SALARY),
        factors: vec![PredictionFactor {
            name: DEGRADED_FACTOR_NAME.to_string(),
            impact: 0.0,
            description: "The prediction service could not be reached. This is a placeholder \
                          estimate, not a model prediction."
                .to_string(),
        }],
        metadata: Some(PredictionMetadata {
            model_version: Some(FALLBACK_MODEL_VERSION.to_string()),
            model_type: Some("Static estimate".to_string()),
            model_accuracy: None,
            prediction_timestamp: Some(chrono::Utc::now().to_rfc3339()),
            features_processed: Some(0),
        }),
    }
}

/// True for results produced by [`degraded_result`]
pub fn is_degraded(result: &PredictionResult) -> bool {
    result
        .metadata
        .as_ref()
        .and_then(|m| m.model_version.as_deref())
        == Some(FALLBACK_MODEL_VERSION)
}
