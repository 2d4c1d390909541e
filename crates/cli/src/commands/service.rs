//! Service health and model metadata commands

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use colored::Colorize;
use salary_lib::service_info::{FeatureImportance, RankedFeature};
use salary_lib::ServiceClient;
use std::sync::Arc;
use tabled::Tabled;

use crate::output::{
    color_percent, color_status, format_percent, format_salary, print_json, print_success,
    print_table, print_warning, OutputFormat,
};

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct RankedFeatureRow {
    #[tabled(rename = "Rank")]
    rank: u32,
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Importance")]
    importance: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Importance")]
    importance: String,
}

/// Render a service timestamp in local time, passing unparseable text through
fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Check service health
pub async fn health(client: Arc<ServiceClient>, format: OutputFormat) -> Result<()> {
    let health = client.health().await?;

    if format == OutputFormat::Json {
        return print_json(&health);
    }

    println!("{}", "Service Health".bold());
    println!("{}", "=".repeat(60));
    println!("Endpoint:               {}", client.base_url());
    println!("Status:                 {}", color_status(&health.status));
    println!(
        "Model loaded:           {}",
        if health.model_loaded { "yes".green() } else { "no".red() }
    );
    if let Some(version) = &health.version {
        println!("Version:                {}", version);
    }
    if let Some(timestamp) = &health.timestamp {
        println!("Checked at:             {}", format_timestamp(timestamp));
    }
    println!();

    if !health.services.is_empty() {
        let rows: Vec<ServiceRow> = health
            .services
            .iter()
            .map(|(name, status)| ServiceRow {
                name: name.clone(),
                status: color_status(status.as_str()),
            })
            .collect();
        print_table(&rows);
        println!();
    }

    if health.can_predict() {
        print_success("Service is ready for live predictions");
        Ok(())
    } else if health.is_healthy() {
        print_warning("Service is up but predictions will use the placeholder estimate");
        Ok(())
    } else {
        bail!("Service reported status '{}'", health.status)
    }
}

fn feature_rows(features: &[FeatureImportance]) -> Vec<FeatureRow> {
    features
        .iter()
        .map(|f| FeatureRow {
            name: f.name.clone(),
            importance: format!("{:.4}", f.importance),
        })
        .collect()
}

/// Show metadata about the deployed model
pub async fn model_info(client: Arc<ServiceClient>, format: OutputFormat) -> Result<()> {
    let info = client.model_info().await?;

    if format == OutputFormat::Json {
        return print_json(&info);
    }

    let unknown = || "unknown".to_string();
    println!("{}", "Model Information".bold());
    println!("{}", "=".repeat(60));
    println!(
        "Type:                   {}",
        info.model_type.clone().unwrap_or_else(unknown).cyan()
    );
    println!(
        "Version:                {}",
        info.model_version.clone().unwrap_or_else(unknown)
    );
    println!(
        "Loaded:                 {}",
        if info.is_loaded { "yes".green() } else { "no".red() }
    );
    println!(
        "Scaler:                 {}",
        if info.has_scaler { "yes" } else { "no" }
    );
    if let Some(accuracy) = info.training_accuracy {
        // Accuracy arrives as a fraction
        let percent = if accuracy <= 1.0 { accuracy * 100.0 } else { accuracy };
        println!("Training accuracy:      {}", color_percent(percent));
    }
    println!("Features:               {}", info.feature_count);
    if let Some(n) = info.n_estimators {
        println!("Estimators:             {}", n);
    }
    if let Some(depth) = info.max_depth {
        println!("Max depth:              {}", depth);
    }
    println!();

    if !info.top_features.is_empty() {
        println!("{}", "Top Features".bold());
        print_table(&feature_rows(&info.top_features));
    }
    Ok(())
}

fn ranked_rows(features: &[&RankedFeature]) -> Vec<RankedFeatureRow> {
    features
        .iter()
        .enumerate()
        .map(|(i, f)| RankedFeatureRow {
            rank: f.rank.unwrap_or(i as u32 + 1),
            name: f.feature.clone(),
            importance: format!("{:.4}", f.importance),
            share: format_percent(f.percentage.unwrap_or(f.importance * 100.0)),
        })
        .collect()
}

/// Show the model's ranked feature importance
pub async fn model_features(client: Arc<ServiceClient>, top: usize, format: OutputFormat) -> Result<()> {
    let report = client.model_features().await?;

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    println!("{}", "Feature Importance".bold());
    println!("{}", "=".repeat(60));
    if let Some(model_type) = &report.model_type {
        println!("Model type:             {}", model_type.cyan());
    }
    println!("Total features:         {}", report.total_features);
    println!();
    print_table(&ranked_rows(&report.top(top)));
    Ok(())
}

fn metric_or_dash(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| "-".to_string(), render)
}

/// Show model evaluation metrics
pub async fn model_performance(client: Arc<ServiceClient>, format: OutputFormat) -> Result<()> {
    let perf = client.model_performance().await?;

    if format == OutputFormat::Json {
        return print_json(&perf);
    }

    let fixed = |v: f64| format!("{:.4}", v);
    println!("{}", "Model Performance".bold());
    println!("{}", "=".repeat(60));
    println!("R²:                     {}", metric_or_dash(perf.accuracy.r2_score, fixed));
    println!("MAE:                    {}", metric_or_dash(perf.accuracy.mae, format_salary));
    println!("RMSE:                   {}", metric_or_dash(perf.accuracy.rmse, format_salary));
    println!("MAPE:                   {}", metric_or_dash(perf.accuracy.mape, format_percent));
    println!();

    let scores = &perf.validation_scores;
    println!("{}", "Validation".bold());
    println!("Cross-validation mean:  {}", metric_or_dash(scores.cross_validation_mean, fixed));
    println!("Cross-validation std:   {}", metric_or_dash(scores.cross_validation_std, fixed));
    println!("Train score:            {}", metric_or_dash(scores.train_score, fixed));
    println!("Test score:             {}", metric_or_dash(scores.test_score, fixed));
    if let Some(gap) = perf.generalization_gap() {
        if gap > 0.1 {
            print_warning(&format!("Train/test gap of {:.4} suggests overfitting", gap));
        }
    }
    println!();

    let quality = &perf.data_quality;
    println!("{}", "Training Data".bold());
    println!("Samples:                {}", quality.total_samples);
    println!("Features:               {}", quality.features_count);
    println!(
        "Missing data:           {}",
        metric_or_dash(quality.missing_data_percentage, format_percent)
    );
    println!(
        "Outliers:               {}",
        metric_or_dash(quality.outliers_percentage, format_percent)
    );
    println!();

    if !perf.feature_importance.is_empty() {
        println!("{}", "Top Features".bold());
        let features: Vec<&RankedFeature> = perf.feature_importance.iter().collect();
        print_table(&ranked_rows(&features));
    }
    Ok(())
}
