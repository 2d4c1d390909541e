//! Core data models for salary prediction

use crate::serde_ext::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience tier, derived solely from years of experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
    #[serde(rename = "Executive")]
    Executive,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
            ExperienceLevel::Executive => "Executive",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanySize {
    Small,
    #[default]
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub const ALL: [CompanySize; 4] = [
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
            CompanySize::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company locations supported by the prediction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanyLocation {
    #[serde(rename = "United States")]
    UnitedStates,
    Canada,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    Germany,
    France,
    Denmark,
    Sweden,
    Singapore,
    Israel,
    Austria,
    India,
    China,
    #[default]
    Other,
}

impl CompanyLocation {
    pub const ALL: [CompanyLocation; 13] = [
        CompanyLocation::UnitedStates,
        CompanyLocation::Canada,
        CompanyLocation::UnitedKingdom,
        CompanyLocation::Germany,
        CompanyLocation::France,
        CompanyLocation::Denmark,
        CompanyLocation::Sweden,
        CompanyLocation::Singapore,
        CompanyLocation::Israel,
        CompanyLocation::Austria,
        CompanyLocation::India,
        CompanyLocation::China,
        CompanyLocation::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyLocation::UnitedStates => "United States",
            CompanyLocation::Canada => "Canada",
            CompanyLocation::UnitedKingdom => "United Kingdom",
            CompanyLocation::Germany => "Germany",
            CompanyLocation::France => "France",
            CompanyLocation::Denmark => "Denmark",
            CompanyLocation::Sweden => "Sweden",
            CompanyLocation::Singapore => "Singapore",
            CompanyLocation::Israel => "Israel",
            CompanyLocation::Austria => "Austria",
            CompanyLocation::India => "India",
            CompanyLocation::China => "China",
            CompanyLocation::Other => "Other",
        }
    }
}

impl fmt::Display for CompanyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical, validated prediction request body.
///
/// Built only through [`crate::validation::FormDraft::into_submission`], which
/// derives `experience_level` from `years_experience` at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub(crate) job_title: String,
    pub(crate) years_experience: u32,
    pub(crate) experience_level: ExperienceLevel,
    pub(crate) company_location: CompanyLocation,
    pub(crate) company_size: CompanySize,
    pub(crate) remote_ratio: u8,
    pub(crate) required_skills: Vec<String>,
    pub(crate) benefits: Vec<String>,
    pub(crate) job_description: String,
}

impl PredictionInput {
    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn years_experience(&self) -> u32 {
        self.years_experience
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    pub fn company_location(&self) -> CompanyLocation {
        self.company_location
    }

    pub fn company_size(&self) -> CompanySize {
        self.company_size
    }

    pub fn remote_ratio(&self) -> u8 {
        self.remote_ratio
    }

    pub fn required_skills(&self) -> &[String] {
        &self.required_skills
    }

    pub fn benefits(&self) -> &[String] {
        &self.benefits
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }
}

/// Qualitative standing of a predicted salary against comparable roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketPosition {
    TopTier,
    AboveAverage,
    Average,
    BelowAverage,
    #[default]
    Unknown,
}

impl MarketPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPosition::TopTier => "Top Tier",
            MarketPosition::AboveAverage => "Above Average",
            MarketPosition::Average => "Average",
            MarketPosition::BelowAverage => "Below Average",
            MarketPosition::Unknown => "Unknown",
        }
    }

    /// Bucket a salary using the service's market bands
    pub fn for_salary(salary: f64) -> Self {
        if salary < 80_000.0 {
            MarketPosition::BelowAverage
        } else if salary < 120_000.0 {
            MarketPosition::Average
        } else if salary < 180_000.0 {
            MarketPosition::AboveAverage
        } else {
            MarketPosition::TopTier
        }
    }
}

impl From<String> for MarketPosition {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "top tier" => MarketPosition::TopTier,
            "above average" => MarketPosition::AboveAverage,
            "average" => MarketPosition::Average,
            "below average" => MarketPosition::BelowAverage,
            _ => MarketPosition::Unknown,
        }
    }
}

impl From<MarketPosition> for String {
    fn from(value: MarketPosition) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for MarketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One explanatory factor behind a prediction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionFactor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Model provenance attached to a prediction.
///
/// The service emits snake_case keys; camelCase is accepted as well.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMetadata {
    #[serde(default, alias = "model_version")]
    pub model_version: Option<String>,
    #[serde(default, alias = "model_type")]
    pub model_type: Option<String>,
    #[serde(default, alias = "model_accuracy")]
    pub model_accuracy: Option<f64>,
    #[serde(default, alias = "prediction_timestamp")]
    pub prediction_timestamp: Option<String>,
    #[serde(default, alias = "features_processed")]
    pub features_processed: Option<u32>,
}

/// Prediction returned by the inference service.
///
/// Every field tolerates absence so a partial payload still renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicted_salary: f64,
    #[serde(default)]
    pub confidence_interval: Option<ConfidenceInterval>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similar_jobs: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub market_position: MarketPosition,
    #[serde(default, deserialize_with = "null_as_default")]
    pub factors: Vec<PredictionFactor>,
    #[serde(default)]
    pub metadata: Option<PredictionMetadata>,
}

impl PredictionResult {
    pub fn model_accuracy(&self) -> Option<f64> {
        self.metadata.as_ref().and_then(|m| m.model_accuracy)
    }
}
