//! Prediction and skill recommendation commands

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use salary_lib::normalizer::{recommend_skills, RemoteCategory};
use salary_lib::{
    CompanyLocation, CompanySize, FormDraft, PredictionSession, PredictionState, ServiceClient,
    StructuredLogger,
};
use serde_json::json;
use std::sync::Arc;
use tabled::Tabled;

use crate::output::{
    color_market_position, color_percent, format_impact, format_salary,
    print_error, print_info, print_json, print_table, print_warning, OutputFormat,
};

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Job title, e.g. "Senior ML Engineer"
    #[arg(long, short)]
    pub title: String,

    /// Years of professional experience
    #[arg(long, short, allow_negative_numbers = true)]
    pub years: i64,

    /// Company location (country name or code, e.g. "usa", "de")
    #[arg(long, short)]
    pub location: Option<String>,

    /// Company size (small, medium, large, enterprise, startup, 1000+, ...)
    #[arg(long)]
    pub company_size: Option<String>,

    /// Share of remote work in percent (0-100, steps of 10)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub remote: i64,

    /// Required skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,

    /// Benefits, comma separated
    #[arg(long, value_delimiter = ',')]
    pub benefits: Vec<String>,

    /// Free-text job description
    #[arg(long)]
    pub description: Option<String>,

    /// Do not fill in recommended skills when none are given
    #[arg(long)]
    pub no_auto_skills: bool,
}

impl PredictArgs {
    fn into_draft(self) -> (FormDraft, bool) {
        let mut draft = FormDraft::new(self.title, self.years);
        draft.company_location = self
            .location
            .as_deref()
            .map(CompanyLocation::normalize)
            .unwrap_or_default();
        draft.company_size = self
            .company_size
            .as_deref()
            .map(CompanySize::normalize)
            .unwrap_or_default();
        draft.remote_ratio = self.remote;
        draft.required_skills = self.skills;
        draft.benefits = self.benefits;
        draft.job_description = self.description.unwrap_or_default();

        let auto_filled = !self.no_auto_skills && draft.apply_skill_recommendations();
        (draft, auto_filled)
    }
}

#[derive(Tabled)]
struct FactorRow {
    #[tabled(rename = "Factor")]
    name: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Validate the inputs, request a prediction and render it
pub async fn predict(client: Arc<ServiceClient>, args: PredictArgs, format: OutputFormat) -> Result<()> {
    let (draft, auto_filled) = args.into_draft();
    let session = PredictionSession::new(client, StructuredLogger::new("cli"));
    let state = session.submit(draft.clone()).await;

    match state.as_ref() {
        PredictionState::Invalid(errors) => {
            if format == OutputFormat::Json {
                print_json(&json!({ "status": "invalid", "errors": errors }))?;
            } else {
                print_error("The prediction request is invalid:");
                for (field, message) in errors.iter() {
                    eprintln!("  {} {}", format!("{}:", field).bold(), message);
                }
            }
            bail!("{} invalid field(s)", errors.len());
        }
        PredictionState::Failed {
            kind,
            message,
            hints,
        } => {
            if format == OutputFormat::Json {
                print_json(&json!({
                    "status": "failed",
                    "kind": kind.as_str(),
                    "message": message,
                    "hints": hints,
                }))?;
            } else {
                print_error(message);
                for hint in hints {
                    eprintln!("  - {}", hint);
                }
            }
            bail!("Prediction failed ({})", kind.as_str());
        }
        PredictionState::Ready {
            result,
            view,
            degraded,
        } => {
            if format == OutputFormat::Json {
                return print_json(&json!({
                    "status": if *degraded { "degraded" } else { "success" },
                    "autoFilledSkills": auto_filled,
                    "input": draft,
                    "experienceLevel": draft.experience_level(),
                    "result": result,
                    "view": view,
                }));
            }

            if *degraded {
                print_warning(
                    "Prediction service unavailable. Showing a placeholder estimate, not a model prediction.",
                );
                println!();
            }

            println!("{}", "Salary Prediction".bold());
            println!("{}", "=".repeat(60));
            println!("Job title:              {}", draft.job_title.trim().cyan());
            if let Some(level) = draft.experience_level() {
                println!("Experience:             {} years ({})", draft.years_experience, level);
            }
            println!("Location:               {}", draft.company_location);
            println!("Company size:           {}", draft.company_size);
            let remote = u8::try_from(draft.remote_ratio).unwrap_or_default();
            println!(
                "Work arrangement:       {} ({}% remote)",
                RemoteCategory::from_ratio(remote).as_str(),
                remote
            );
            if !draft.required_skills.is_empty() {
                println!("Skills:                 {}", draft.required_skills.join(", "));
            }
            println!();

            println!(
                "Predicted salary:       {}",
                format_salary(view.predicted_salary).green().bold()
            );
            println!(
                "Range:                  {} - {}",
                format_salary(view.range_low),
                format_salary(view.range_high)
            );
            println!("Margin of error:        ±{}", format_salary(view.margin_of_error));
            println!(
                "Precision:              {}",
                color_percent(f64::from(view.precision_percent))
            );
            println!("Model confidence:       {}", color_percent(view.model_confidence));
            println!(
                "Market position:        {}",
                color_market_position(view.market_position)
            );
            println!("                        {}", view.market_narrative.dimmed());
            println!("Similar jobs:           {}", view.similar_jobs);
            println!();

            let rows: Vec<FactorRow> = view
                .factors
                .iter()
                .map(|f| FactorRow {
                    name: f.name.clone(),
                    impact: format_impact(f.impact),
                    description: f.description.clone(),
                })
                .collect();
            println!("{}", "Contributing Factors".bold());
            print_table(&rows);
            println!();

            println!(
                "Model: {} {} (predicted at {})",
                view.model_type,
                view.model_version,
                view.predicted_at
            );
            if auto_filled {
                print_info("Skills were filled in from the job title; pass --skills to set them.");
            }
            Ok(())
        }
        PredictionState::Idle | PredictionState::Pending { .. } => {
            bail!("Prediction did not complete")
        }
    }
}

/// Print the skill recommendation for a job title
pub fn recommend(title: &str, format: OutputFormat) -> Result<()> {
    let recommendation = recommend_skills(title);

    if format == OutputFormat::Json {
        return print_json(&recommendation);
    }

    if recommendation.is_empty() {
        print_warning(&format!("No skill recommendations for \"{}\"", title));
        return Ok(());
    }

    println!("{} {}", "Recommended skills for".bold(), title.cyan().bold());
    println!("{}", "=".repeat(60));
    for (label, skills) in [
        ("Core", &recommendation.core),
        ("Advanced", &recommendation.advanced),
        ("Tools", &recommendation.tools),
    ] {
        println!("{:<10} {}", format!("{}:", label), skills.join(", "));
    }
    Ok(())
}
