//! Prediction flow: live inference with a degraded-mode fallback, and the
//! presenter that turns a result into display metrics.

mod fallback;
mod presenter;

pub use fallback::{
    degraded_result, is_degraded, DEGRADED_FACTOR_NAME, FALLBACK_MODEL_VERSION, FALLBACK_SALARY,
    MODEL_MAE,
};
pub use presenter::{
    market_narrative, model_confidence, precision_and_margin, PredictionView,
    DEFAULT_MARGIN_RATIO, DEFAULT_MODEL_CONFIDENCE, DEFAULT_PRECISION, MAX_PRECISION,
    MIN_PRECISION,
};

use crate::backend::PredictionBackend;
use crate::error::ClientError;
use crate::models::{PredictionInput, PredictionResult};
use crate::observability::ClientMetrics;

/// Result of a prediction attempt once unavailability has been absorbed
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Live(PredictionResult),
    /// The service was unreachable; `result` is the placeholder estimate
    Degraded { result: PredictionResult, reason: String },
}

impl PredictionOutcome {
    pub fn result(&self) -> &PredictionResult {
        match self {
            PredictionOutcome::Live(result) => result,
            PredictionOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> PredictionResult {
        match self {
            PredictionOutcome::Live(result) => result,
            PredictionOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, PredictionOutcome::Degraded { .. })
    }
}

/// Predict, recovering from an unreachable service with the degraded result.
///
/// Service and transport errors still propagate; only `Unavailable` is
/// absorbed. Every degraded answer is counted in `ClientMetrics`.
pub async fn predict_with_fallback<B>(
    backend: &B,
    input: &PredictionInput,
) -> Result<PredictionOutcome, ClientError>
where
    B: PredictionBackend + ?Sized,
{
    match backend.predict(input).await {
        Ok(result) => Ok(PredictionOutcome::Live(result)),
        Err(ClientError::Unavailable(reason)) => {
            tracing::warn!(reason = %reason, "Prediction service unavailable, using fallback estimate");
            ClientMetrics::new().inc_predictions_degraded();
            Ok(PredictionOutcome::Degraded {
                result: degraded_result(),
                reason,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormDraft;
    use async_trait::async_trait;

    struct Fixed(fn() -> Result<PredictionResult, ClientError>);

    #[async_trait]
    impl PredictionBackend for Fixed {
        async fn predict(&self, _input: &PredictionInput) -> Result<PredictionResult, ClientError> {
            (self.0)()
        }
    }

    fn input() -> PredictionInput {
        FormDraft::new("Data Scientist", 4).into_submission().unwrap()
    }

    #[tokio::test]
    async fn test_live_result_passes_through() {
        let backend = Fixed(|| {
            Ok(PredictionResult {
                predicted_salary: 130_000.0,
                ..Default::default()
            })
        });
        let outcome = predict_with_fallback(&backend, &input()).await.unwrap();
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.result().predicted_salary, 130_000.0);
    }

    #[tokio::test]
    async fn test_unavailable_becomes_degraded() {
        let backend = Fixed(|| Err(ClientError::Unavailable("connection refused".into())));
        let metrics = ClientMetrics::new();
        let before = metrics.predictions_degraded();
        let outcome = predict_with_fallback(&backend, &input()).await.unwrap();
        assert!(outcome.is_degraded());
        assert!(metrics.predictions_degraded() > before);
        let result = outcome.into_result();
        assert_eq!(result.predicted_salary, 115_000.0);
        assert_eq!(result.factors[0].name, DEGRADED_FACTOR_NAME);
    }

    #[tokio::test]
    async fn test_service_errors_are_not_masked() {
        let backend = Fixed(|| Err(ClientError::Service("Invalid job title".into())));
        let err = predict_with_fallback(&backend, &input()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid job title");
    }
}
