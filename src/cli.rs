// Command-line arguments.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Bike Sharing Dashboard
///
/// Loads the daily bike-sharing dataset and prints the rent total, the daily
/// series, the season/year breakdown and the monthly trend for a date range.
///
/// Examples:
///   bike_report --data day.csv
///   bike_report --start 2011-06-01 --end 2011-08-31
///   bike_report --interactive --export-dir out/
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the daily dataset (CSV with dteday, season, yr, mnth, cnt)
    #[arg(short, long, value_name = "FILE", env = "BIKE_REPORT_DATA")]
    pub data: Option<PathBuf>,

    /// First day of the range (YYYY-MM-DD). Defaults to the earliest date.
    #[arg(long, value_name = "DATE", value_parser = parse_cli_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD). Defaults to the latest date.
    #[arg(long, value_name = "DATE", value_parser = parse_cli_date)]
    pub end: Option<NaiveDate>,

    /// Prompt for date ranges repeatedly instead of rendering once
    #[arg(short, long)]
    pub interactive: bool,

    /// Directory to write CSV/JSON exports of every pass into
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .bike_report.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Width of the longest chart bar, in characters
    #[arg(long, value_name = "COLS")]
    pub chart_width: Option<usize>,

    /// Number of rows shown in each table preview
    #[arg(long, value_name = "ROWS")]
    pub preview_rows: Option<usize>,

    /// Calendar year that `yr = 0` refers to
    #[arg(long, value_name = "YEAR")]
    pub base_year: Option<i32>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_cli_date(s: &str) -> Result<NaiveDate, String> {
    crate::util::parse_date_safe(Some(s))
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(format!("--start {} is after --end {}", start, end));
            }
        }
        if self.chart_width == Some(0) {
            return Err("--chart-width must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
