//! Analytics CLI commands

use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use salary_lib::analytics::{Filter, FilterOption, SalaryRange, SkillStats, TrendPoint};
use salary_lib::{
    AnalyticsPanel, AnalyticsQuery, AnalyticsResult, CompanySize, ExperienceLevel, PanelState,
    ServiceClient, StructuredLogger,
};
use serde_json::json;
use std::sync::Arc;
use tabled::Tabled;

use crate::output::{
    color_status, format_impact, format_percent, format_salary, print_json, print_table,
    print_warning, OutputFormat,
};

#[derive(Debug, Args)]
pub struct OverviewArgs {
    /// Location filter (as listed by `analytics summary`)
    #[arg(long)]
    pub location: Option<String>,

    /// Experience level filter (entry, mid, senior, executive, ...)
    #[arg(long)]
    pub experience_level: Option<String>,

    /// Company size filter (small, medium, large, enterprise)
    #[arg(long)]
    pub company_size: Option<String>,

    /// Salary range filter (50k-100k, 100k-150k, 150k+)
    #[arg(long)]
    pub salary_range: Option<String>,
}

fn is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(salary_lib::analytics::ALL)
}

impl OverviewArgs {
    /// Build the query; "All" or an absent flag leaves a filter unset
    pub fn into_query(self) -> Result<AnalyticsQuery> {
        let location = self
            .location
            .filter(|v| !is_all(v) && !v.trim().is_empty())
            .map(|v| v.trim().to_string());

        let experience_level = match self.experience_level.filter(|v| !is_all(v)) {
            Some(raw) => Some(
                ExperienceLevel::normalize(&raw)
                    .ok_or_else(|| anyhow!("Unknown experience level '{}'", raw))?,
            ),
            None => None,
        };

        let company_size = match self.company_size.filter(|v| !is_all(v)) {
            Some(raw) => Some(
                CompanySize::ALL
                    .into_iter()
                    .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
                    .ok_or_else(|| anyhow!("Unknown company size '{}'", raw))?,
            ),
            None => None,
        };

        let salary_range = match self.salary_range.filter(|v| !is_all(v)) {
            Some(raw) => Some(raw.parse::<SalaryRange>().map_err(|e| anyhow!(e))?),
            None => None,
        };

        Ok(AnalyticsQuery {
            location: Filter::from(location),
            experience_level: Filter::from(experience_level),
            company_size: Filter::from(company_size),
            salary_range: Filter::from(salary_range),
        })
    }
}

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Avg Salary")]
    average: String,
    #[tabled(rename = "Median")]
    median: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
    #[tabled(rename = "Growth")]
    growth: String,
}

#[derive(Tabled)]
struct ExperienceRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Avg Salary")]
    average: String,
    #[tabled(rename = "Q25")]
    q25: String,
    #[tabled(rename = "Median")]
    median: String,
    #[tabled(rename = "Q75")]
    q75: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
}

#[derive(Tabled)]
struct CompanySizeRow {
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Avg Salary")]
    average: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
    #[tabled(rename = "Remote")]
    remote: String,
}

#[derive(Tabled)]
struct SkillRow {
    #[tabled(rename = "Skill")]
    skill: String,
    #[tabled(rename = "Salary Boost")]
    boost: String,
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Demand")]
    demand: String,
    #[tabled(rename = "Growth")]
    growth: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Avg Salary")]
    average: String,
    #[tabled(rename = "Postings")]
    postings: i64,
    #[tabled(rename = "Applications")]
    applications: i64,
}

#[derive(Tabled)]
struct TitleRow {
    #[tabled(rename = "Job Title")]
    title: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Avg Salary")]
    average: String,
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Records")]
    records: String,
}

/// Fetch the analytics overview and render it behind the sufficiency gate
pub async fn overview(client: Arc<ServiceClient>, args: OverviewArgs, format: OutputFormat) -> Result<()> {
    let query = args.into_query()?;
    let panel = AnalyticsPanel::new(client, StructuredLogger::new("cli"));
    let state = panel.refresh(query.clone()).await;

    if format == OutputFormat::Json {
        let data = match state.as_ref() {
            PanelState::Ready(result) => Some(result),
            _ => None,
        };
        print_json(&json!({
            "state": state.name(),
            "guidance": state.guidance(),
            "filters": query.query_pairs().into_iter().collect::<std::collections::BTreeMap<_, _>>(),
            "data": data,
        }))?;
        if let PanelState::Error { message, .. } = state.as_ref() {
            bail!("{}", message);
        }
        return Ok(());
    }

    println!("{}", "Market Analytics".bold());
    println!("{}", "=".repeat(60));
    let filters = query.query_pairs();
    if filters.is_empty() {
        println!("Filters:                {}", "none".dimmed());
    } else {
        let described: Vec<String> = filters.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("Filters:                {}", described.join(", ").cyan());
    }
    println!("State:                  {}", color_status(state.name()));
    println!();

    match state.as_ref() {
        PanelState::Ready(result) => {
            if let Some(guidance) = state.guidance() {
                println!("{}", guidance.dimmed());
                println!();
            }
            render_result(result);
            Ok(())
        }
        PanelState::Error { message, .. } => {
            if let Some(guidance) = state.guidance() {
                print_warning(&guidance);
            }
            bail!("{}", message)
        }
        PanelState::NoData { offer_reset } | PanelState::InsufficientData { offer_reset, .. } => {
            if let Some(guidance) = state.guidance() {
                print_warning(&guidance);
            }
            if *offer_reset {
                println!("Run `salary analytics overview` without filters to see the full dataset.");
            }
            Ok(())
        }
        PanelState::Loading => bail!("Analytics request did not complete"),
    }
}

fn growth_label(growth: &str) -> String {
    if growth.is_empty() {
        "-".to_string()
    } else {
        format!("{}%", growth)
    }
}

fn skill_rows(skills: &[SkillStats]) -> Vec<SkillRow> {
    skills
        .iter()
        .map(|s| SkillRow {
            skill: s.skill.clone(),
            boost: format_impact(s.salary_boost),
            frequency: format_percent(s.frequency),
            demand: format!("{:.1}", s.demand),
            growth: growth_label(&s.growth),
        })
        .collect()
}

fn trend_rows(trend: &[TrendPoint]) -> Vec<TrendRow> {
    trend
        .iter()
        .map(|t| TrendRow {
            month: t.month.clone(),
            average: format_salary(t.average_salary),
            postings: t.job_postings,
            applications: t.applications,
        })
        .collect()
}

fn render_result(result: &AnalyticsResult) {
    let meta = &result.metadata;
    println!(
        "Records:                {} of {}",
        meta.filtered_records, meta.total_records
    );
    if let Some(quality) = meta.data_quality {
        println!("Data quality:           {}", format_percent(quality));
    }
    if let Some(updated) = &meta.last_updated {
        println!("Last updated:           {}", updated);
    }
    println!();

    println!("{}", "Salary Distribution".bold());
    print_table(
        &result
            .salary_distribution
            .iter()
            .map(|b| BucketRow {
                range: b.range.clone(),
                count: b.count,
                share: format_percent(b.percentage),
            })
            .collect::<Vec<_>>(),
    );
    println!();

    println!("{}", "By Location".bold());
    print_table(
        &result
            .geographic_data
            .iter()
            .map(|l| LocationRow {
                location: l.location.clone(),
                average: format_salary(l.average_salary),
                median: format_salary(l.median_salary),
                jobs: l.job_count,
                growth: growth_label(&l.growth),
            })
            .collect::<Vec<_>>(),
    );
    println!();

    println!("{}", "By Experience Level".bold());
    print_table(
        &result
            .experience_data
            .iter()
            .map(|e| ExperienceRow {
                level: e.level.clone(),
                average: format_salary(e.average_salary),
                q25: format_salary(e.q25),
                median: format_salary(e.median),
                q75: format_salary(e.q75),
                jobs: e.job_count,
            })
            .collect::<Vec<_>>(),
    );
    println!();

    println!("{}", "By Company Size".bold());
    print_table(
        &result
            .company_size_data
            .iter()
            .map(|c| CompanySizeRow {
                size: c.size.clone(),
                average: format_salary(c.average_salary),
                jobs: c.job_count,
                remote: format_percent(c.remote_ratio),
            })
            .collect::<Vec<_>>(),
    );
    println!();

    println!("{}", "Top Skills".bold());
    print_table(&skill_rows(&result.skills_data));
    println!();

    println!("{}", "Monthly Trend".bold());
    print_table(&trend_rows(&result.trend_data));
    println!();

    println!("{}", "Top Job Titles".bold());
    print_table(
        &result
            .job_title_data
            .iter()
            .map(|t| TitleRow {
                title: t.title.clone(),
                count: t.count,
                average: format_salary(t.average_salary),
            })
            .collect::<Vec<_>>(),
    );
}

fn option_rows(options: Vec<FilterOption>) -> Vec<OptionRow> {
    options
        .into_iter()
        .map(|o| OptionRow {
            value: o.value,
            records: o.count.map_or_else(|| "-".to_string(), |c| c.to_string()),
        })
        .collect()
}

/// Print the filter options the service offers
pub async fn summary(client: Arc<ServiceClient>, format: OutputFormat) -> Result<()> {
    let summary = client.data_summary().await?;

    if format == OutputFormat::Json {
        return print_json(&json!({
            "totalRecords": summary.total_records,
            "locations": summary.location_options(),
            "experienceLevels": summary.experience_level_options(),
            "companySizes": summary.company_size_options(),
        }));
    }

    println!("{}", "Dataset Summary".bold());
    println!("{}", "=".repeat(60));
    println!("Total records:          {}", summary.total_records);
    println!();

    for (title, options) in [
        ("Locations", summary.location_options()),
        ("Experience Levels", summary.experience_level_options()),
        ("Company Sizes", summary.company_size_options()),
    ] {
        println!("{}", title.bold());
        print_table(&option_rows(options));
        println!();
    }

    println!("{}", "Salary Ranges".bold());
    let ranges: Vec<&str> = std::iter::once(salary_lib::analytics::ALL)
        .chain(SalaryRange::ALL.iter().map(|r| r.as_str()))
        .collect();
    println!("{}", ranges.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> OverviewArgs {
        OverviewArgs {
            location: None,
            experience_level: None,
            company_size: None,
            salary_range: None,
        }
    }

    #[test]
    fn test_absent_and_all_filters_are_unset() {
        let query = OverviewArgs {
            location: Some("All".to_string()),
            salary_range: Some("all".to_string()),
            ..args()
        }
        .into_query()
        .unwrap();
        assert!(!query.is_filtered());
    }

    #[test]
    fn test_filters_are_parsed() {
        let query = OverviewArgs {
            location: Some("Canada".to_string()),
            experience_level: Some("senior".to_string()),
            company_size: Some("Large".to_string()),
            salary_range: Some("100k-150k".to_string()),
        }
        .into_query()
        .unwrap();

        assert_eq!(query.location, Filter::Only("Canada".to_string()));
        assert_eq!(query.experience_level, Filter::Only(ExperienceLevel::Senior));
        assert_eq!(query.company_size, Filter::Only(CompanySize::Large));
        assert_eq!(query.salary_range, Filter::Only(SalaryRange::From100kTo150k));
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let bad_level = OverviewArgs {
            experience_level: Some("wizard".to_string()),
            ..args()
        };
        assert!(bad_level.into_query().is_err());

        let bad_size = OverviewArgs {
            company_size: Some("gigantic".to_string()),
            ..args()
        };
        assert!(bad_size.into_query().is_err());

        let bad_range = OverviewArgs {
            salary_range: Some("200k+".to_string()),
            ..args()
        };
        assert!(bad_range.into_query().is_err());
    }

    #[test]
    fn test_skill_rows() {
        let rows = skill_rows(&[SkillStats {
            skill: "Python".to_string(),
            salary_boost: 15_500.0,
            frequency: 61.0,
            demand: 7.42,
            growth: "12.1".to_string(),
        }]);
        assert_eq!(rows[0].boost, "+$15,500");
        assert_eq!(rows[0].frequency, "61%");
        assert_eq!(rows[0].demand, "7.4");
        assert_eq!(rows[0].growth, "12.1%");
    }

    #[test]
    fn test_trend_rows_keep_negative_counts() {
        let rows = trend_rows(&[TrendPoint {
            month: "Feb".to_string(),
            average_salary: 97_000.0,
            job_postings: -3,
            applications: -12,
        }]);
        assert_eq!(rows[0].average, "$97,000");
        assert_eq!(rows[0].postings, -3);
        assert_eq!(rows[0].applications, -12);
        assert_eq!(growth_label(""), "-");
    }
}
