//! oncall-report CLI
//!
//! # Commands
//!
//! - `oncall-report serve --config <dir>` - Serve the HTTP API
//! - `oncall-report report --config <dir> --input <coverage.json>` - Print a report

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oncall_report::api::{AppState, create_router};
use oncall_report::calculation::generate_report;
use oncall_report::config::ConfigLoader;
use oncall_report::error::ReportError;
use oncall_report::models::{ReportWindow, ScheduleCoverage};
use oncall_report::render::render_console;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid coverage file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

type Result<T> = std::result::Result<T, CliError>;

/// On-call rotation hours and compensation reports
#[derive(Parser)]
#[command(name = "oncall-report")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the report HTTP API
    Serve {
        /// Configuration directory
        #[arg(short, long, default_value = "./config/example")]
        config: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: String,
    },

    /// Generate a report from a coverage file
    Report {
        /// Configuration directory
        #[arg(short, long, default_value = "./config/example")]
        config: PathBuf,

        /// JSON file holding a list of schedule coverages
        #[arg(short, long)]
        input: PathBuf,

        /// Month to report (YYYY-MM); defaults to the previous month
        #[arg(short, long)]
        month: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| CliError::InvalidMonth(value.to_string()))
}

fn read_coverage(path: &Path) -> Result<Vec<ScheduleCoverage>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn run_report(
    config_dir: &Path,
    input: &Path,
    month: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let config = ConfigLoader::load(config_dir)?;
    let boundary_hour = config.rotation_boundary_hour();
    let window = match month {
        Some(value) => {
            let (year, month) = parse_month(value)?;
            ReportWindow::for_month(year, month, boundary_hour)?
        }
        None => ReportWindow::previous_month(Local::now().date_naive(), boundary_hour)?,
    };
    info!(start = %window.start, end = %window.end, "Report window");

    let schedules = read_coverage(input)?;
    let report = generate_report(window, &schedules, &config)?;

    match format {
        OutputFormat::Table => print!("{}", render_console(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

async fn run_server(config_dir: &Path, addr: &str) -> Result<()> {
    let config = ConfigLoader::load(config_dir)?;
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Io {
            path: addr.to_string(),
            source,
        })?;
    info!(addr = %addr, "Listening");
    axum::serve(listener, app)
        .await
        .map_err(|source| CliError::Io {
            path: addr.to_string(),
            source,
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, addr } => run_server(&config, &addr).await,
        Commands::Report {
            config,
            input,
            month,
            format,
        } => run_report(&config, &input, month.as_deref(), format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), (2024, 3));
        assert_eq!(parse_month("2024-12").unwrap(), (2024, 12));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert!(matches!(
            parse_month("2024-13"),
            Err(CliError::InvalidMonth(_))
        ));
        assert!(parse_month("march").is_err());
    }

    #[test]
    fn test_cli_parses_report_command() {
        let cli = Cli::parse_from([
            "oncall-report",
            "report",
            "--input",
            "coverage.json",
            "--month",
            "2024-03",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Report {
                input,
                month,
                format,
                ..
            } => {
                assert_eq!(input, PathBuf::from("coverage.json"));
                assert_eq!(month.as_deref(), Some("2024-03"));
                assert!(matches!(format, OutputFormat::Json));
            }
            Commands::Serve { .. } => panic!("expected report command"),
        }
    }
}
