//! Salary Predictor CLI
//!
//! A command-line front end for the salary prediction service: request
//! predictions, browse market analytics, and check service health.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{analytics, predict, service};
use salary_lib::{ClientConfig, ClientMetrics, ServiceClient};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Salary Predictor CLI
#[derive(Parser)]
#[command(name = "salary")]
#[command(author, version, about = "CLI for the Salary Predictor service", long_about = None)]
pub struct Cli {
    /// Service base URL (can also be set via SALARY_API_URL env var)
    #[arg(long, env = "SALARY_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Print client metrics in Prometheus text format before exiting
    #[arg(long)]
    pub dump_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the salary for a job description
    Predict(predict::PredictArgs),

    /// Show recommended skills for a job title
    Recommend {
        /// Job title, e.g. "Data Scientist"
        title: String,
    },

    /// Browse market analytics
    #[command(subcommand)]
    Analytics(AnalyticsCommands),

    /// Inspect the deployed model
    #[command(subcommand)]
    Model(ModelCommands),

    /// Check service health
    Health,
}

#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Show the analytics overview for the given filters
    Overview(analytics::OverviewArgs),

    /// List the available filter values with record counts
    Summary,
}

#[derive(Subcommand)]
pub enum ModelCommands {
    /// Show model metadata and top features
    Info,

    /// Show ranked feature importance
    Features {
        /// Number of features to show
        #[arg(long, default_value_t = 15)]
        top: usize,
    },

    /// Show evaluation metrics and training data statistics
    Performance,
}

fn init_tracing(verbose: bool, log_format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    // Flag or env var first, then the config file, then defaults
    let file_config = config::Config::load()?;
    let mut client_config = ClientConfig::load()?;
    client_config.api_url = file_config.resolve_api_url(cli.api_url.as_deref(), &client_config.api_url);
    if let Some(secs) = cli.timeout_secs {
        client_config.request_timeout_secs = secs;
    }
    let format = cli
        .format
        .or_else(|| output::OutputFormat::from_config(file_config.default_format.as_deref()))
        .unwrap_or_default();
    debug!(api_url = %client_config.api_url, timeout_secs = client_config.request_timeout_secs, "CLI configured");

    // Initialize client
    let client = Arc::new(ServiceClient::new(&client_config)?);

    // Execute command
    let outcome = match cli.command {
        Commands::Predict(args) => predict::predict(client, args, format).await,
        Commands::Recommend { title } => predict::recommend(&title, format),
        Commands::Analytics(analytics_cmd) => match analytics_cmd {
            AnalyticsCommands::Overview(args) => analytics::overview(client, args, format).await,
            AnalyticsCommands::Summary => analytics::summary(client, format).await,
        },
        Commands::Model(model_cmd) => match model_cmd {
            ModelCommands::Info => service::model_info(client, format).await,
            ModelCommands::Features { top } => service::model_features(client, top, format).await,
            ModelCommands::Performance => service::model_performance(client, format).await,
        },
        Commands::Health => service::health(client, format).await,
    };

    if cli.dump_metrics {
        eprintln!("{}", ClientMetrics::new().render());
    }

    outcome
}
