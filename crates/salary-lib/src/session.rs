//! Per-session prediction state
//!
//! State is replaced wholesale on each transition and handed out as an
//! immutable `Arc` snapshot. Responses are applied only if no newer request
//! was issued in the meantime.

use crate::backend::PredictionBackend;
use crate::error::{ClientError, ErrorKind};
use crate::models::PredictionResult;
use crate::observability::{ClientMetrics, StructuredLogger};
use crate::prediction::{predict_with_fallback, PredictionOutcome, PredictionView};
use crate::validation::{FormDraft, ValidationErrors};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Monotonic request tickets. Only the most recent ticket may apply its
/// response.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest() == ticket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionState {
    Idle,
    Pending { sequence: u64 },
    /// Rejected locally; nothing was sent
    Invalid(ValidationErrors),
    Ready {
        result: PredictionResult,
        view: PredictionView,
        degraded: bool,
    },
    Failed {
        kind: ErrorKind,
        message: String,
        hints: Vec<String>,
    },
}

impl PredictionState {
    pub fn name(&self) -> &'static str {
        match self {
            PredictionState::Idle => "idle",
            PredictionState::Pending { .. } => "pending",
            PredictionState::Invalid(_) => "invalid",
            PredictionState::Ready { degraded: false, .. } => "ready",
            PredictionState::Ready { degraded: true, .. } => "degraded",
            PredictionState::Failed { .. } => "failed",
        }
    }

    fn failed(err: &ClientError) -> Self {
        PredictionState::Failed {
            kind: err.kind(),
            message: err.to_string(),
            hints: err.remediation().into_iter().map(String::from).collect(),
        }
    }
}

/// Prediction form session: validate, predict, present
pub struct PredictionSession<B: PredictionBackend + ?Sized> {
    backend: Arc<B>,
    sequencer: RequestSequencer,
    state: RwLock<Arc<PredictionState>>,
    logger: StructuredLogger,
    metrics: ClientMetrics,
}

impl<B: PredictionBackend + ?Sized> PredictionSession<B> {
    pub fn new(backend: Arc<B>, logger: StructuredLogger) -> Self {
        Self {
            backend,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(Arc::new(PredictionState::Idle)),
            logger,
            metrics: ClientMetrics::new(),
        }
    }

    pub async fn snapshot(&self) -> Arc<PredictionState> {
        self.state.read().await.clone()
    }

    /// Validate and submit a draft.
    ///
    /// Validation failures never reach the backend. An unreachable service
    /// yields the degraded result. Returns the state current after this
    /// submission resolves, which is a newer one if this response was stale.
    pub async fn submit(&self, draft: FormDraft) -> Arc<PredictionState> {
        let job_title = draft.job_title.trim().to_string();
        let input = match draft.into_submission() {
            Ok(input) => input,
            Err(errors) => {
                return self.transition(PredictionState::Invalid(errors)).await;
            }
        };

        let sequence = {
            let mut state = self.state.write().await;
            let sequence = self.sequencer.issue();
            *state = Arc::new(PredictionState::Pending { sequence });
            sequence
        };

        let next = match predict_with_fallback(self.backend.as_ref(), &input).await {
            Ok(PredictionOutcome::Live(result)) => {
                self.logger.log_prediction(
                    sequence,
                    &job_title,
                    result.predicted_salary,
                    result.market_position.as_str(),
                    result.metadata.as_ref().and_then(|m| m.model_version.as_deref()),
                );
                ready(result, false)
            }
            Ok(PredictionOutcome::Degraded { result, reason }) => {
                self.logger.log_degraded(sequence, &reason);
                ready(result, true)
            }
            Err(e) => {
                self.logger
                    .log_prediction_failed(sequence, e.kind().as_str(), &e.to_string());
                PredictionState::failed(&e)
            }
        };

        self.apply(sequence, next).await
    }

    /// Drop the current result and ignore any response still in flight
    pub async fn clear(&self) -> Arc<PredictionState> {
        self.transition(PredictionState::Idle).await
    }

    /// Issue a ticket and move to `next` immediately
    async fn transition(&self, next: PredictionState) -> Arc<PredictionState> {
        let mut state = self.state.write().await;
        self.sequencer.issue();
        *state = Arc::new(next);
        state.clone()
    }

    async fn apply(&self, sequence: u64, next: PredictionState) -> Arc<PredictionState> {
        let mut state = self.state.write().await;
        if self.sequencer.is_current(sequence) {
            *state = Arc::new(next);
        } else {
            self.metrics.inc_stale_responses();
            self.logger
                .log_stale_response("prediction", sequence, self.sequencer.latest());
        }
        state.clone()
    }
}

fn ready(result: PredictionResult, degraded: bool) -> PredictionState {
    let view = PredictionView::from_result(&result);
    PredictionState::Ready {
        result,
        view,
        degraded,
    }
}
