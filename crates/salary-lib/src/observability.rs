//! Observability for the salary client
//!
//! Provides:
//! - Prometheus metrics (request outcomes and latency, degraded predictions,
//!   discarded stale responses, analytics sufficiency states)
//! - Structured logging of significant client events with tracing

use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Histogram buckets for request latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

static GLOBAL_METRICS: OnceLock<ClientMetricsInner> = OnceLock::new();

struct ClientMetricsInner {
    requests_total: IntCounterVec,
    request_latency_seconds: HistogramVec,
    predictions_degraded: IntCounter,
    stale_responses: IntCounter,
    analytics_states: IntCounterVec,
}

impl ClientMetricsInner {
    fn new() -> Self {
        Self {
            requests_total: register_int_counter_vec!(
                "salary_client_requests_total",
                "Requests sent to the salary service by endpoint and outcome",
                &["endpoint", "outcome"]
            )
            .expect("Failed to register requests_total"),

            request_latency_seconds: register_histogram_vec!(
                "salary_client_request_latency_seconds",
                "Round-trip latency of salary service requests",
                &["endpoint"],
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register request_latency_seconds"),

            predictions_degraded: register_int_counter!(
                "salary_client_predictions_degraded_total",
                "Predictions answered with the degraded-mode estimate"
            )
            .expect("Failed to register predictions_degraded"),

            stale_responses: register_int_counter!(
                "salary_client_stale_responses_total",
                "Responses discarded because a newer request had been issued"
            )
            .expect("Failed to register stale_responses"),

            analytics_states: register_int_counter_vec!(
                "salary_client_analytics_state_total",
                "Resolved analytics panel states",
                &["state"]
            )
            .expect("Failed to register analytics_states"),
        }
    }
}

/// Lightweight handle to the process-wide client metrics.
/// Clones share the same underlying collectors.
#[derive(Clone)]
pub struct ClientMetrics {
    _private: (),
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ClientMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ClientMetricsInner {
        GLOBAL_METRICS.get_or_init(ClientMetricsInner::new)
    }

    /// Record one completed (or failed) request
    pub fn observe_request(&self, endpoint: &str, outcome: &str, duration_secs: f64) {
        let inner = self.inner();
        inner
            .requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();
        inner
            .request_latency_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }

    pub fn inc_predictions_degraded(&self) {
        self.inner().predictions_degraded.inc();
    }

    /// Degraded predictions served by this process so far
    pub fn predictions_degraded(&self) -> u64 {
        self.inner().predictions_degraded.get()
    }

    pub fn inc_stale_responses(&self) {
        self.inner().stale_responses.inc();
    }

    pub fn inc_analytics_state(&self, state: &str) {
        self.inner().analytics_states.with_label_values(&[state]).inc();
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let families = prometheus::gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&families, &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Structured logger for client events
#[derive(Clone)]
pub struct StructuredLogger {
    session: String,
}

impl StructuredLogger {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }

    pub fn log_prediction(
        &self,
        sequence: u64,
        job_title: &str,
        predicted_salary: f64,
        market_position: &str,
        model_version: Option<&str>,
    ) {
        info!(
            event = "prediction_completed",
            session = %self.session,
            sequence = sequence,
            job_title = %job_title,
            predicted_salary = predicted_salary,
            market_position = %market_position,
            model_version = ?model_version,
            "Prediction received"
        );
    }

    pub fn log_degraded(&self, sequence: u64, reason: &str) {
        warn!(
            event = "prediction_degraded",
            session = %self.session,
            sequence = sequence,
            reason = %reason,
            "Prediction service unreachable, showing degraded estimate"
        );
    }

    pub fn log_prediction_failed(&self, sequence: u64, kind: &str, message: &str) {
        warn!(
            event = "prediction_failed",
            session = %self.session,
            sequence = sequence,
            kind = %kind,
            message = %message,
            "Prediction request failed"
        );
    }

    pub fn log_stale_response(&self, panel: &str, sequence: u64, latest: u64) {
        debug!(
            event = "stale_response_discarded",
            session = %self.session,
            panel = %panel,
            sequence = sequence,
            latest = latest,
            "Discarded response superseded by a newer request"
        );
    }

    pub fn log_analytics(&self, sequence: u64, state: &str, filtered_records: u64, total_records: u64) {
        info!(
            event = "analytics_classified",
            session = %self.session,
            sequence = sequence,
            state = %state,
            filtered_records = filtered_records,
            total_records = total_records,
            "Analytics response classified"
        );
    }
}
