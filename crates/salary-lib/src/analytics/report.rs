//! Aggregate analytics payloads
//!
//! The client never computes aggregates; these types only carry what the
//! service returns. Every field tolerates absence or `null`.

use crate::error::ClientError;
use crate::serde_ext::{null_as_default, string_or_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::query::ALL;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryBucket {
    #[serde(default, deserialize_with = "null_as_default")]
    pub range: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub median_salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_count: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub q25: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub median: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub q75: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary_boost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frequency: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub demand: f64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySizeStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remote_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_salary: f64,
    /// Noisy monthly estimates; small samples can report negative counts
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_postings: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applications: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_salary: f64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetadata {
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_records: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filtered_records: u64,
    #[serde(default)]
    pub data_quality: Option<f64>,
    #[serde(default)]
    pub model_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub applied_filters: BTreeMap<String, String>,
}

/// Aggregate series for one filter state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary_distribution: Vec<SalaryBucket>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geographic_data: Vec<LocationStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_data: Vec<ExperienceStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_data: Vec<SkillStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_size_data: Vec<CompanySizeStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend_data: Vec<TrendPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title_data: Vec<JobTitleStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: AnalyticsMetadata,
}

impl AnalyticsResult {
    pub fn filtered_records(&self) -> u64 {
        self.metadata.filtered_records
    }

    /// Reject payloads whose counts contradict each other
    pub fn validate(&self) -> Result<(), ClientError> {
        let meta = &self.metadata;
        if meta.filtered_records > meta.total_records {
            return Err(ClientError::MalformedBody(format!(
                "filteredRecords ({}) exceeds totalRecords ({})",
                meta.filtered_records, meta.total_records
            )));
        }
        if let Some(quality) = meta.data_quality {
            if !(0.0..=100.0).contains(&quality) {
                return Err(ClientError::MalformedBody(format!(
                    "dataQuality {} is outside [0, 100]",
                    quality
                )));
            }
        }
        Ok(())
    }
}

/// One selectable value in a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    /// `None` for the "All" entry
    pub count: Option<u64>,
}

/// Available filter values with per-value record counts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_levels: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_sizes: BTreeMap<String, u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_records: u64,
}

impl DataSummary {
    pub fn location_options(&self) -> Vec<FilterOption> {
        filter_options(&self.locations)
    }

    pub fn experience_level_options(&self) -> Vec<FilterOption> {
        filter_options(&self.experience_levels)
    }

    pub fn company_size_options(&self) -> Vec<FilterOption> {
        filter_options(&self.company_sizes)
    }
}

/// "All" first, then values by descending count, ties broken by name
pub fn filter_options(counts: &BTreeMap<String, u64>) -> Vec<FilterOption> {
    let mut ranked: Vec<(&String, &u64)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    std::iter::once(FilterOption {
        value: ALL.to_string(),
        count: None,
    })
    .chain(ranked.into_iter().map(|(value, count)| FilterOption {
        value: value.clone(),
        count: Some(*count),
    }))
    .collect()
}
