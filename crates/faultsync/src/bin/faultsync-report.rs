//! Prints the prioritised fault list with live durations.
//!
//! Usage: `faultsync-report [CONFIG_PATH]`. Without a path the platform config
//! directory is tried, then environment variables alone.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use log::{error, info};

use faultsync::config::{default_config_path, load_config};
use faultsync::{Config, ConfigError, FaultSession};

fn resolve_config() -> Result<Config, ConfigError> {
    let path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| default_config_path().filter(|p| p.exists()));

    let mut config = match path {
        Some(path) => load_config(&path)?,
        None => return Config::from_env(),
    };
    config.apply_env_overrides();
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("faultsync-report: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = faultsync::logging::init_logging(&config.logging) {
        eprintln!("faultsync-report: {}", e);
    }

    info!("Starting faultsync-report v{}", env!("CARGO_PKG_VERSION"));

    let mut session = match FaultSession::connect(&config.gateway) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to create session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    session.load().await;

    let now = Utc::now();
    let zone = session.time_zone();
    for record in session.working_set().prioritized() {
        println!(
            "{:>5}  {:<16}  {:<40}  {:<16}  {:>10}",
            record
                .row_number
                .map(|r| r.to_string())
                .unwrap_or_default(),
            record.status,
            record.route_name,
            zone.format_display(&record.fault_in),
            record.duration(now, zone).to_string(),
        );
    }

    ExitCode::SUCCESS
}
