//! Analytics panel state machine
//!
//! `Loading` on every refresh, then one of `Error`, `NoData`,
//! `InsufficientData` or `Ready`. The last resolved state is held until the
//! next refresh.

use super::query::AnalyticsQuery;
use super::report::{AnalyticsResult, DataSummary};
use super::sufficiency::DataSufficiency;
use crate::backend::AnalyticsBackend;
use crate::error::{ClientError, ErrorKind};
use crate::observability::{ClientMetrics, StructuredLogger};
use crate::session::RequestSequencer;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    /// Always surfaced; [`AnalyticsPanel::retry`] repeats the last query
    Error { kind: ErrorKind, message: String },
    NoData { offer_reset: bool },
    InsufficientData { records: u64, offer_reset: bool },
    Ready(AnalyticsResult),
}

impl PanelState {
    pub fn name(&self) -> &'static str {
        match self {
            PanelState::Loading => "loading",
            PanelState::Error { .. } => "error",
            PanelState::NoData { .. } => "no_data",
            PanelState::InsufficientData { .. } => "insufficient_data",
            PanelState::Ready(_) => "ready",
        }
    }

    /// Classify a response for the filter state that produced it
    pub fn from_result(result: AnalyticsResult, query: &AnalyticsQuery) -> Self {
        let records = result.filtered_records();
        let offer_reset = query.is_filtered();
        match DataSufficiency::classify(records) {
            DataSufficiency::NoData => PanelState::NoData { offer_reset },
            DataSufficiency::Insufficient => PanelState::InsufficientData {
                records,
                offer_reset,
            },
            DataSufficiency::Sufficient => PanelState::Ready(result),
        }
    }

    /// Guidance text for the state, if it has any
    pub fn guidance(&self) -> Option<String> {
        match self {
            PanelState::Loading => None,
            PanelState::Error { message, .. } => {
                Some(format!("Could not load analytics: {}. Try again.", message))
            }
            PanelState::NoData { offer_reset } => {
                Some(DataSufficiency::NoData.guidance(0, *offer_reset))
            }
            PanelState::InsufficientData {
                records,
                offer_reset,
            } => Some(DataSufficiency::Insufficient.guidance(*records, *offer_reset)),
            PanelState::Ready(result) => Some(
                DataSufficiency::Sufficient.guidance(result.filtered_records(), false),
            ),
        }
    }
}

pub struct AnalyticsPanel<B: AnalyticsBackend + ?Sized> {
    backend: Arc<B>,
    sequencer: RequestSequencer,
    state: RwLock<Arc<PanelState>>,
    last_query: Mutex<AnalyticsQuery>,
    logger: StructuredLogger,
    metrics: ClientMetrics,
}

impl<B: AnalyticsBackend + ?Sized> AnalyticsPanel<B> {
    pub fn new(backend: Arc<B>, logger: StructuredLogger) -> Self {
        Self {
            backend,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(Arc::new(PanelState::Loading)),
            last_query: Mutex::new(AnalyticsQuery::default()),
            logger,
            metrics: ClientMetrics::new(),
        }
    }

    pub async fn snapshot(&self) -> Arc<PanelState> {
        self.state.read().await.clone()
    }

    pub fn current_query(&self) -> AnalyticsQuery {
        self.last_query
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    /// Fetch analytics for `query` and resolve the panel state
    pub async fn refresh(&self, query: AnalyticsQuery) -> Arc<PanelState> {
        let sequence = {
            let mut state = self.state.write().await;
            let sequence = self.sequencer.issue();
            *state = Arc::new(PanelState::Loading);
            if let Ok(mut last) = self.last_query.lock() {
                *last = query.clone();
            }
            sequence
        };

        let next = match self.backend.overview(&query).await {
            Ok(result) => {
                let meta = &result.metadata;
                let (filtered, total) = (meta.filtered_records, meta.total_records);
                let next = PanelState::from_result(result, &query);
                self.logger.log_analytics(sequence, next.name(), filtered, total);
                next
            }
            Err(e) => error_state(&e),
        };

        let mut state = self.state.write().await;
        if self.sequencer.is_current(sequence) {
            self.metrics.inc_analytics_state(next.name());
            *state = Arc::new(next);
        } else {
            self.metrics.inc_stale_responses();
            self.logger
                .log_stale_response("analytics", sequence, self.sequencer.latest());
        }
        state.clone()
    }

    /// Repeat the most recent query
    pub async fn retry(&self) -> Arc<PanelState> {
        self.refresh(self.current_query()).await
    }

    /// Clear every filter and refresh
    pub async fn reset_filters(&self) -> Arc<PanelState> {
        self.refresh(AnalyticsQuery::default()).await
    }

    /// Filter dropdown options. Independent of the panel state.
    pub async fn filter_options(&self) -> Result<DataSummary, ClientError> {
        self.backend.data_summary().await
    }
}

fn error_state(err: &ClientError) -> PanelState {
    tracing::warn!(error = %err, kind = err.kind().as_str(), "Analytics request failed");
    PanelState::Error {
        kind: err.kind(),
        message: err.to_string(),
    }
}
