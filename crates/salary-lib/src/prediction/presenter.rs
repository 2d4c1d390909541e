//! Display metrics derived from a prediction
//!
//! Every missing field falls back to a fixed value so a partial result always
//! renders. The fallback constants are part of the public contract.

use crate::models::{MarketPosition, PredictionFactor, PredictionResult};
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

/// Confidence shown when the result carries no usable model accuracy
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 73.36;
/// Precision shown when no usable interval is available
pub const DEFAULT_PRECISION: u8 = 85;
/// Margin as a share of the predicted salary when no usable interval is available
pub const DEFAULT_MARGIN_RATIO: f64 = 0.3;
pub const MIN_PRECISION: u8 = 60;
pub const MAX_PRECISION: u8 = 95;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub predicted_salary: f64,
    pub range_low: f64,
    pub range_high: f64,
    pub margin_of_error: f64,
    pub precision_percent: u8,
    pub model_confidence: f64,
    pub market_position: MarketPosition,
    pub market_narrative: String,
    pub similar_jobs: u64,
    pub factors: Vec<PredictionFactor>,
    pub model_version: String,
    pub model_type: String,
    pub predicted_at: String,
}

impl PredictionView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let predicted = sanitize(result.predicted_salary);
        let (precision, margin) = precision_and_margin(result);
        let metadata = result.metadata.clone().unwrap_or_default();

        let (range_low, range_high) = match usable_interval(result) {
            Some((lower, upper)) => (lower, upper),
            None => ((predicted - margin).max(0.0), predicted + margin),
        };

        Self {
            predicted_salary: predicted,
            range_low,
            range_high,
            margin_of_error: margin,
            precision_percent: precision,
            model_confidence: model_confidence(result.model_accuracy()),
            market_position: result.market_position,
            market_narrative: market_narrative(result.market_position).to_string(),
            similar_jobs: result.similar_jobs,
            factors: result.factors.clone(),
            model_version: metadata.model_version.unwrap_or_else(|| UNKNOWN.to_string()),
            model_type: metadata.model_type.unwrap_or_else(|| UNKNOWN.to_string()),
            predicted_at: metadata
                .prediction_timestamp
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Interval bounds when they can drive precision: present, ordered and
/// paired with a positive prediction
fn usable_interval(result: &PredictionResult) -> Option<(f64, f64)> {
    let predicted = sanitize(result.predicted_salary);
    result
        .confidence_interval
        .filter(|ci| ci.is_ordered() && ci.lower.is_finite() && ci.upper.is_finite())
        .filter(|_| predicted > 0.0)
        .map(|ci| (ci.lower, ci.upper))
}

/// Model accuracy as a percentage with two decimals.
///
/// Values above 1 are taken as already being percentages.
pub fn model_confidence(accuracy: Option<f64>) -> f64 {
    match accuracy {
        Some(a) if a.is_finite() && a > 0.0 => {
            let percent = if a <= 1.0 { a * 100.0 } else { a.min(100.0) };
            (percent * 100.0).round() / 100.0
        }
        _ => DEFAULT_MODEL_CONFIDENCE,
    }
}

/// Precision percentage and margin of error for a result
pub fn precision_and_margin(result: &PredictionResult) -> (u8, f64) {
    let predicted = sanitize(result.predicted_salary);
    match usable_interval(result) {
        Some((lower, upper)) => {
            let width = upper - lower;
            let raw = ((1.0 - width / predicted) * 100.0).round();
            let precision = raw.clamp(MIN_PRECISION as f64, MAX_PRECISION as f64) as u8;
            (precision, (width / 2.0).round())
        }
        None => (DEFAULT_PRECISION, (predicted * DEFAULT_MARGIN_RATIO).round()),
    }
}

pub fn market_narrative(position: MarketPosition) -> &'static str {
    match position {
        MarketPosition::TopTier => {
            "Top tier: this compensation sits well above comparable roles in the market."
        }
        MarketPosition::AboveAverage => {
            "Above average: this compensation is competitive against comparable roles."
        }
        MarketPosition::Average => {
            "Average: this compensation is in line with comparable roles."
        }
        MarketPosition::BelowAverage => {
            "Below average: comparable roles tend to pay more; consider negotiating."
        }
        MarketPosition::Unknown => "Market position is not available for this prediction.",
    }
}

fn format_timestamp(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d %H:%M:%S %Z").to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
