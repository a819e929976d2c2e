//! Weather API CLI
//!
//! Schema setup, batch ingestion and queries against a running server.

#![allow(clippy::print_stdout)]

mod ingest;

use std::path::PathBuf;

use application::IngestionReport;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LogFormat, init_tracing};
use tracing::warn;

use crate::ingest::IngestOptions;

const DEFAULT_URL: &str = "http://localhost:8000";

/// Weather API CLI
#[derive(Debug, Parser)]
#[command(name = "weatherapi-cli")]
#[command(author, version, about = "Weather forecast ingestion and query CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "WEATHERAPI_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database schema and seed the configured locations
    InitDb {
        /// Path to the SQLite database (overrides configuration)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Fetch forecasts for every configured location and load them
    ///
    /// Example: weatherapi-cli ingest --days 3 --interval-hours 3
    Ingest {
        /// Forecast horizon in days (1-16)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        days: Option<u32>,

        /// Hours between samples
        #[arg(long)]
        interval_hours: Option<u32>,

        /// Load previously staged files instead of calling the provider
        #[arg(long, conflicts_with = "no_stage")]
        from_staging: bool,

        /// Do not write staged files
        #[arg(long)]
        no_stage: bool,

        /// Path to the SQLite database (overrides configuration)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List locations
    Locations {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Latest forecast rows per day
    Latest {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Average temperature of the last three samples per location and day
    AvgTemp {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Top N locations for every metric
    Top {
        /// Rows per metric (1-10)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        n: u8,

        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Check server health (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn load_config(path: Option<&str>, database: Option<PathBuf>) -> AppConfig {
    let mut config = AppConfig::load_from(path).unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Some(database) = database {
        config.database.path = database.to_string_lossy().into_owned();
    }
    config
}

async fn get_json(client: &reqwest::Client, url: &str, path: &str) -> anyhow::Result<()> {
    let resp = client
        .get(endpoint_url(url, path))
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;

    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

/// Print an ingestion report; skipped locations are not a failure
fn print_report(report: &IngestionReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);

    if !report.is_complete() {
        warn!(
            skipped = report.skipped.len(),
            "Ingestion finished with skipped locations"
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(log_filter_from_verbosity(cli.verbose), LogFormat::Text);

    let client = reqwest::Client::new();

    match cli.command {
        Commands::InitDb { database } => {
            let config = load_config(cli.config.as_deref(), database);
            let inserted = ingest::init_db(&config).await?;
            println!(
                "Database ready at {} ({inserted} new locations)",
                config.database.path
            );
        },

        Commands::Ingest {
            days,
            interval_hours,
            from_staging,
            no_stage,
            database,
        } => {
            let config = load_config(cli.config.as_deref(), database);
            let options = IngestOptions {
                days,
                interval_hours,
                from_staging,
                no_stage,
            };
            let report = ingest::run_ingest(&config, options).await?;
            print_report(&report)?;
        },

        Commands::Locations { url } => get_json(&client, &url, "/locations").await?,

        Commands::Latest { url } => get_json(&client, &url, "/latest_forecast_daily").await?,

        Commands::AvgTemp { url } => get_json(&client, &url, "/avg_temp_l3_daily").await?,

        Commands::Top { n, url } => {
            get_json(&client, &url, &format!("/top_locations/{n}")).await?;
        },

        Commands::Health { url } => {
            let resp = client.get(endpoint_url(&url, "/health")).send().await;

            match resp {
                Ok(r) if r.status().is_success() => {
                    println!("Healthy");
                },
                Ok(r) => {
                    println!("Unhealthy: HTTP {}", r.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("Unreachable: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
