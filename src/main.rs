// Entry point and high-level CLI flow.
//
// - The dataset is loaded and validated once; any malformed row aborts.
// - Without --interactive a single date range is rendered and we exit.
// - With --interactive the user picks a range, sees the dashboard, and can
//   go back to pick another range or exit.
mod aggregate;
mod chart;
mod cli;
mod config;
mod dashboard;
mod dataset;
mod error;
mod loader;
mod output;
mod types;
mod util;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cli::Args;
use config::Config;
use dashboard::Dashboard;
use dataset::DateRange;
use std::io::{self, Write};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Ask for one end of the range. Empty input keeps `default`.
fn prompt_date(label: &str, default: NaiveDate) -> Option<NaiveDate> {
    loop {
        let input = read_line(&format!("{} [{}]: ", label, default))?;
        if input.is_empty() {
            return Some(default);
        }
        match util::parse_date_safe(Some(&input)) {
            Some(d) => return Some(d),
            None => println!("Invalid date. Please use YYYY-MM-DD."),
        }
    }
}

/// Ask whether to go back and pick another range. `false` means exit.
fn prompt_change_range() -> bool {
    loop {
        let Some(resp) = read_line("Change date range (Y/N): ") else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn prompt_range(dash: &Dashboard, current: DateRange) -> Option<DateRange> {
    let (min, max) = dash.dataset().bounds();
    println!("Date range (available {} to {})", min, max);
    loop {
        let start = prompt_date("Start date", current.start())?;
        let end = prompt_date("End date", current.end())?;
        match dash.dataset().range(Some(start), Some(end)) {
            Ok(range) => return Some(range),
            Err(e) => println!("{}. Please try again.", e),
        }
    }
}

fn run_interactive(dash: &Dashboard, initial: DateRange) -> Result<()> {
    let mut current = initial;
    loop {
        let Some(range) = prompt_range(dash, current) else {
            break;
        };
        dash.run_pass(&range)?;
        current = range;
        if !prompt_change_range() {
            break;
        }
    }
    println!("Exiting the program.");
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::load_default()?.unwrap_or_default(),
    };
    config.merge_with_args(args);
    debug!("Effective config: {:?}", config);
    Ok(config)
}

fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a global tracing subscriber was already set");
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let path = config.data.path.clone();
    let (dataset, report) = loader::load_and_validate(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    info!(
        "Loaded {} rows ({} to {})",
        util::format_int(report.total_rows),
        report.min_date,
        report.max_date
    );

    let dash = Dashboard::new(dataset, config);
    let range = dash.dataset().range(args.start, args.end)?;

    if args.interactive {
        run_interactive(&dash, range)
    } else {
        dash.run_pass(&range)?;
        Ok(())
    }
}

fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(&args);
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        report_failure(&e);
        std::process::exit(1);
    }
}

/// Log a fatal error once, through the stderr subscriber.
fn report_failure(e: &anyhow::Error) {
    error!("Dashboard failed: {:#}", e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failure_is_reported_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let err = anyhow::anyhow!("dataset contains no rows")
            .context("Failed to load dataset day.csv");
        tracing::subscriber::with_default(subscriber, || report_failure(&err));

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("dataset contains no rows").count(), 1);
        assert!(text.contains("Failed to load dataset day.csv: dataset contains no rows"));
    }
}
