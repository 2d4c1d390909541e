//! Client core for the salary insights service
//!
//! This crate provides:
//! - Input normalization (experience tiers, free-text categories, skill recommendations)
//! - Form validation
//! - The prediction client with a degraded-mode fallback
//! - Result presentation metrics
//! - Analytics queries and data sufficiency gating
//! - Session state machines with stale-response protection
//! - Metrics and structured logging

pub mod analytics;
pub mod backend;
pub mod client;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod observability;
pub mod prediction;
pub mod serde_ext;
pub mod service_info;
pub mod session;
pub mod validation;

pub use analytics::{AnalyticsPanel, AnalyticsQuery, AnalyticsResult, DataSummary, PanelState};
pub use backend::{AnalyticsBackend, PredictionBackend};
pub use client::{ClientConfig, ServiceClient};
pub use error::{ClientError, ErrorKind};
pub use models::*;
pub use observability::{ClientMetrics, StructuredLogger};
pub use prediction::{PredictionOutcome, PredictionView};
pub use service_info::{FeatureImportanceReport, ModelInfo, ModelPerformance, ServiceHealth};
pub use session::{PredictionSession, PredictionState, RequestSequencer};
pub use validation::{FormDraft, ValidationErrors};
