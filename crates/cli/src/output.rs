//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use salary_lib::MarketPosition;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring unknown values
    pub fn from_config(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| <Self as ValueEnum>::from_str(v, true).ok())
    }
}

/// Print a table from a list of items
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("{}", "No items found".yellow());
        return;
    }
    let table = Table::new(items).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a salary in whole US dollars with thousands separators
pub fn format_salary(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a signed salary impact, e.g. "+$18,000"
pub fn format_impact(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", format_salary(amount))
    } else {
        format_salary(amount)
    }
}

/// Color status based on value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" | "available" | "ready" => status.green().to_string(),
        "degraded" | "insufficient_data" | "no_data" => status.yellow().to_string(),
        "unhealthy" | "unavailable" | "error" | "failed" => status.red().to_string(),
        _ => status.to_string(),
    }
}

pub fn color_market_position(position: MarketPosition) -> String {
    let label = position.as_str();
    match position {
        MarketPosition::TopTier => label.green().bold().to_string(),
        MarketPosition::AboveAverage => label.green().to_string(),
        MarketPosition::Average => label.blue().to_string(),
        MarketPosition::BelowAverage => label.yellow().to_string(),
        MarketPosition::Unknown => label.dimmed().to_string(),
    }
}

/// Percentage with at most two decimals, e.g. "73.36%" or "85%"
pub fn format_percent(percent: f64) -> String {
    let fixed = format!("{:.2}", percent);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

/// Color a percentage based on value
pub fn color_percent(percent: f64) -> String {
    let formatted = format_percent(percent);
    if percent >= 80.0 {
        formatted.green().to_string()
    } else if percent >= 65.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(125_000.0), "$125,000");
        assert_eq!(format_salary(92_481.4), "$92,481");
        assert_eq!(format_salary(999.0), "$999");
        assert_eq!(format_salary(1_234_567.0), "$1,234,567");
        assert_eq!(format_salary(0.0), "$0");
        assert_eq!(format_salary(-2_500.0), "-$2,500");
    }

    #[test]
    fn test_format_impact() {
        assert_eq!(format_impact(18_000.0), "+$18,000");
        assert_eq!(format_impact(-4_000.0), "-$4,000");
        assert_eq!(format_impact(0.0), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(73.36), "73.36%");
        assert_eq!(format_percent(85.0), "85%");
        assert_eq!(format_percent(73.4), "73.4%");
    }

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config(Some("JSON")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config(Some("table")), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_config(Some("yaml")), None);
        assert_eq!(OutputFormat::from_config(None), None);
    }
}
