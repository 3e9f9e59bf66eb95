// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Timeline Calendar www API
//!

use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::{Path, PathBuf};
use timeline_calendar_core::YearPolicy;
use timeline_calendar_store::db_url_from_path;
use timeline_calendar_www_api::prepare_api_router;

#[macro_use]
extern crate log;
extern crate simplelog;

/// Timeline Calendar www API entry point (serve the www JSON API)
#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("timeline_calendar")
        .add_filter_allow_str("tower_http")
        .build();
    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        args.log_level,
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Error setting up logging: {error}");
    }

    // Work out the calendar settings
    let policy = match year_policy(&args) {
        Ok(policy) => policy,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };
    info!("Calendar settings: {policy:?}");

    if let Err(error) = serve(&args.database, &args.address, policy).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// The settings file (if any), overridden by whatever was given on the
/// command line
fn year_policy(args: &Cli) -> Result<YearPolicy, Box<dyn std::error::Error>> {
    let from_file = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            serde_json::from_str(&json)?
        }
        None => YearPolicy::default(),
    };
    let policy = YearPolicy::new(
        args.reference_year
            .map(i64::from)
            .unwrap_or(i64::from(from_file.reference_year())),
        args.allow_year_zero.unwrap_or(from_file.allow_year_zero()),
        args.allow_negative_years
            .unwrap_or(from_file.allow_negative_years()),
    )?;
    Ok(policy)
}

/// Serve the API
async fn serve(
    database: &Path,
    addr: &str,
    policy: YearPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    // Get the router
    let api_router = prepare_api_router(&db_url_from_path(database), policy).await?;

    // Bind the listener for new connections
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Print the address
    println!("http://{addr}");

    // Serve the server
    axum::serve(listener, api_router).await?;
    Ok(())
}

/// Timeline Calendar www API CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Timeline Calendar www API server",
    after_help = "This is intended for use when deploying to a server and in CI"
)]
pub struct Cli {
    /// Path to the database
    #[arg(long)]
    pub database: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:2408")]
    pub address: String,

    /// Path to a JSON file of calendar settings, e.g.
    /// `{ "referenceYear": 1989, "allowYearZero": false }`
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// The real year that fictional Year 1 aligns to
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Whether Year 0 may be shown and navigated to
    ///
    /// Usage is `--allow-year-zero=<true/false>`.  Defaults to the settings
    /// file, else false.
    #[arg(long)]
    pub allow_year_zero: Option<bool>,

    /// Whether years before Year 1 may be shown and navigated to
    ///
    /// Usage is `--allow-negative-years=<true/false>`.  Defaults to the
    /// settings file, else false.
    #[arg(long)]
    pub allow_negative_years: Option<bool>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
