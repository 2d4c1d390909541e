//! Form validation for prediction requests
//!
//! Every rule is evaluated independently and reported under the field it
//! belongs to, so a caller can show all problems at once. A draft with no
//! errors converts into a [`PredictionInput`] with its experience tier
//! derived at that moment.

use crate::models::{CompanyLocation, CompanySize, ExperienceLevel, PredictionInput};
use crate::normalizer::{experience_level_for_years, recommend_skills};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 200;
pub const MAX_YEARS_EXPERIENCE: i64 = 50;
pub const MAX_SKILLS: usize = 20;
pub const MAX_BENEFITS: usize = 15;
pub const MAX_ITEM_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;
pub const REMOTE_RATIO_STEP: i64 = 10;

/// Field names used as keys in [`ValidationErrors`]
pub mod fields {
    pub const JOB_TITLE: &str = "jobTitle";
    pub const YEARS_EXPERIENCE: &str = "yearsExperience";
    pub const REMOTE_RATIO: &str = "remoteRatio";
    pub const REQUIRED_SKILLS: &str = "requiredSkills";
    pub const BENEFITS: &str = "benefits";
    pub const JOB_DESCRIPTION: &str = "jobDescription";
}

/// Field name to human-readable message, one entry per invalid field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. The first message recorded for a field is kept.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Editable prediction form state.
///
/// There is no experience level field. The tier is always
/// computed from `years_experience`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub job_title: String,
    pub years_experience: i64,
    pub company_location: CompanyLocation,
    pub company_size: CompanySize,
    pub remote_ratio: i64,
    pub required_skills: Vec<String>,
    pub benefits: Vec<String>,
    pub job_description: String,
}

impl FormDraft {
    pub fn new(job_title: impl Into<String>, years_experience: i64) -> Self {
        Self {
            job_title: job_title.into(),
            years_experience,
            ..Self::default()
        }
    }

    /// Tier implied by the current years value, if it is in range
    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        u32::try_from(self.years_experience)
            .ok()
            .map(experience_level_for_years)
    }

    pub fn validate(&self) -> ValidationErrors {
        validate_form(self)
    }

    /// Fill the skill list from the title's recommended core skills.
    ///
    /// Only acts while no skills have been chosen, so user edits are never
    /// overwritten. Returns true when skills were filled in.
    pub fn apply_skill_recommendations(&mut self) -> bool {
        if !self.required_skills.is_empty() {
            return false;
        }
        let recommendation = recommend_skills(&self.job_title);
        if recommendation.core.is_empty() {
            return false;
        }
        self.required_skills = recommendation.core;
        true
    }

    /// Validate and build the request payload.
    pub fn into_submission(self) -> Result<PredictionInput, ValidationErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate() has bounded both values
        let years = u32::try_from(self.years_experience).unwrap_or_default();
        let remote_ratio = u8::try_from(self.remote_ratio).unwrap_or_default();

        Ok(PredictionInput {
            job_title: self.job_title.trim().to_string(),
            years_experience: years,
            experience_level: experience_level_for_years(years),
            company_location: self.company_location,
            company_size: self.company_size,
            remote_ratio,
            required_skills: dedup_trimmed(self.required_skills),
            benefits: dedup_trimmed(self.benefits),
            job_description: self.job_description,
        })
    }
}

fn dedup_trimmed(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let item = item.trim().to_string();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn validate_list(
    errors: &mut ValidationErrors,
    field: &str,
    items: &[String],
    max_items: usize,
    noun: &str,
) {
    if items.len() > max_items {
        errors.add(field, format!("Cannot specify more than {} {}", max_items, noun));
    }
    if items.iter().any(|i| i.trim().is_empty()) {
        errors.add(field, format!("{} cannot be empty", capitalize(noun)));
    }
    if items.iter().any(|i| i.chars().count() > MAX_ITEM_CHARS) {
        errors.add(
            field,
            format!("Each {} cannot exceed {} characters", singular(noun), MAX_ITEM_CHARS),
        );
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn singular(noun: &str) -> &str {
    noun.strip_suffix('s').unwrap_or(noun)
}

/// Check a draft against every field constraint
pub fn validate_form(draft: &FormDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let title_len = draft.job_title.trim().chars().count();
    if title_len == 0 {
        errors.add(fields::JOB_TITLE, "Job title is required");
    } else if title_len < TITLE_MIN_CHARS {
        errors.add(
            fields::JOB_TITLE,
            format!("Job title must be at least {} characters", TITLE_MIN_CHARS),
        );
    } else if title_len > TITLE_MAX_CHARS {
        errors.add(
            fields::JOB_TITLE,
            format!("Job title cannot exceed {} characters", TITLE_MAX_CHARS),
        );
    }

    if draft.years_experience < 0 {
        errors.add(fields::YEARS_EXPERIENCE, "Years of experience cannot be negative");
    } else if draft.years_experience > MAX_YEARS_EXPERIENCE {
        errors.add(
            fields::YEARS_EXPERIENCE,
            format!("Years of experience cannot exceed {}", MAX_YEARS_EXPERIENCE),
        );
    }

    if !(0..=100).contains(&draft.remote_ratio) {
        errors.add(fields::REMOTE_RATIO, "Remote ratio must be between 0 and 100");
    } else if draft.remote_ratio % REMOTE_RATIO_STEP != 0 {
        errors.add(
            fields::REMOTE_RATIO,
            format!("Remote ratio must be a multiple of {}", REMOTE_RATIO_STEP),
        );
    }

    validate_list(
        &mut errors,
        fields::REQUIRED_SKILLS,
        &draft.required_skills,
        MAX_SKILLS,
        "skills",
    );
    validate_list(
        &mut errors,
        fields::BENEFITS,
        &draft.benefits,
        MAX_BENEFITS,
        "benefits",
    );

    if draft.job_description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.add(
            fields::JOB_DESCRIPTION,
            "Job description cannot exceed 10,000 characters",
        );
    }

    errors
}
