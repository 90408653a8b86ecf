use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use nutrition_sheet_client::SheetClient;
use nutrition_sheet_client::config::Config;
use nutrition_sheet_client::file_source::CsvFileSource;
use nutrition_sheet_client::http_client::ReqwestSheetClient;
use nutrition_report::render::{render_dashboard, render_measurements, render_text, to_json};
use nutrition_report::{LoggingSheetClient, ReportService};

#[derive(Parser, Debug)]
#[command(name = "nutrition-report")]
#[command(
    version,
    about = "Weekly nutrition coaching reports from a tracking sheet",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read records from an exported CSV file instead of the sheet
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Exported CSV of the measurements tab, used with --csv
    #[arg(long, global = true, requires = "csv")]
    measurements_csv: Option<PathBuf>,

    /// Spreadsheet id
    #[arg(long, global = true, env = "NUTRITION_SHEET_ID")]
    sheet_id: Option<String>,

    /// Sheet (tab) name
    #[arg(long, global = true, env = "NUTRITION_SHEET_NAME")]
    sheet_name: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Averages, macro split and insights for a date range
    Report {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Charts data, situation counts and the last seven days
    Dashboard,
    /// Waist, chest and arm measurements over time
    Measurements,
}

fn sheet_source(cli: &Cli) -> anyhow::Result<Arc<dyn SheetClient>> {
    if let Some(path) = &cli.csv {
        let mut source = CsvFileSource::new(path);
        if let Some(tape) = &cli.measurements_csv {
            source = source.with_measurements(tape);
        }
        return Ok(Arc::new(LoggingSheetClient::new(source)));
    }
    let config = Config::from_env_with(|key| match key {
        "NUTRITION_SHEET_ID" => cli.sheet_id.clone(),
        "NUTRITION_SHEET_NAME" => cli.sheet_name.clone(),
        other => std::env::var(other).ok(),
    })?;
    Ok(Arc::new(LoggingSheetClient::new(ReqwestSheetClient::new(config))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `NUTRITION_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("NUTRITION_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("nutrition_report: log filter: {}", log_env);

    let cli = Cli::parse();
    let service = ReportService::new(sheet_source(&cli)?);

    let output = match &cli.command {
        Commands::Report { start, end } => {
            let report = service
                .weekly_report(Some(start.as_str()), Some(end.as_str()))
                .await?;
            if cli.json {
                to_json(&report)?
            } else {
                render_text(&report)
            }
        }
        Commands::Dashboard => {
            let dashboard = service.dashboard().await?;
            if cli.json {
                to_json(&dashboard)?
            } else {
                render_dashboard(&dashboard)
            }
        }
        Commands::Measurements => {
            let charts = service.measurements().await?;
            if cli.json {
                to_json(&charts)?
            } else {
                render_measurements(&charts)
            }
        }
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_command() {
        let cli = Cli::try_parse_from([
            "nutrition-report",
            "report",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-07",
            "--csv",
            "data.csv",
            "--json",
        ])
        .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.csv, Some(PathBuf::from("data.csv")));
        assert!(matches!(cli.command, Commands::Report { ref start, .. } if start == "2024-01-01"));
    }

    #[test]
    fn report_requires_both_dates() {
        let missing_end = ["nutrition-report", "report", "--start", "2024-01-01"];
        assert!(Cli::try_parse_from(missing_end).is_err());
    }

    #[test]
    fn measurements_export_needs_the_csv_flag() {
        let args = ["nutrition-report", "measurements", "--measurements-csv", "tape.csv"];
        assert!(Cli::try_parse_from(args).is_err());

        let cli = Cli::try_parse_from([
            "nutrition-report",
            "measurements",
            "--csv",
            "x.csv",
            "--measurements-csv",
            "tape.csv",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Commands::Measurements));
        assert_eq!(cli.measurements_csv, Some(PathBuf::from("tape.csv")));
        assert!(sheet_source(&cli).is_ok());
    }

    #[test]
    fn csv_flag_skips_sheet_config() {
        let cli = Cli::try_parse_from(["nutrition-report", "dashboard", "--csv", "x.csv"])
            .expect("parse");
        assert!(sheet_source(&cli).is_ok());
    }
}
