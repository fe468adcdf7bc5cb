//! Bikeshare explorer binary.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session on stdin/stdout
//! bikeshare
//!
//! # One-shot report for a city, month and day
//! bikeshare chicago june all
//! bikeshare "new york city" all friday --json
//!
//! # Explicit configuration file
//! bikeshare --config /etc/bikeshare.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: warn). Logs are written to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use bikeshare_rust::config::BikeshareConfig;
use bikeshare_rust::report::render_report;
use bikeshare_rust::services::StatisticsReport;
use bikeshare_rust::session::Session;
use bikeshare_rust::transformations::TripFilter;

#[derive(Parser, Debug)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data")]
struct Args {
    /// City to report on; omit city, month and day for an interactive session
    #[arg(requires_all = ["month", "day"])]
    city: Option<String>,

    /// Month from january to june, or all
    month: Option<String>,

    /// Day of the week, or all
    day: Option<String>,

    /// Print the one-shot report as JSON
    #[arg(long, requires = "city")]
    json: bool,

    /// Configuration file (default: bikeshare.toml in the usual locations)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<BikeshareConfig> {
    match path {
        Some(path) => BikeshareConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let found = BikeshareConfig::from_default_location()
                .context("Failed to load bikeshare.toml")?;
            Ok(found.unwrap_or_else(|| {
                log::debug!("No bikeshare.toml found; using defaults");
                BikeshareConfig::default()
            }))
        }
    }
}

fn run_once(config: &BikeshareConfig, city: &str, month: &str, day: &str, json: bool) -> Result<()> {
    let filter = TripFilter::parse(month, day)?;
    let store = config
        .registry()?
        .load(city)
        .with_context(|| format!("Failed to load trips for '{}'", city))?;
    let view = filter.apply(&store);
    let report = StatisticsReport::compute(&view)?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", render_report(&report))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match (&args.city, &args.month, &args.day) {
        (Some(city), Some(month), Some(day)) => run_once(&config, city, month, day, args.json),
        _ => {
            let stdin = io::stdin();
            let mut session = Session::new(
                stdin.lock(),
                io::stdout(),
                config.registry()?,
                config.display.page_size,
            )?;
            session.run()?;
            Ok(())
        }
    }
}
