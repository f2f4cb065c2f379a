//! Elidune Desk - command-line front end

mod cli;

use std::process::ExitCode;

use clap::Parser;

use elidune_desk::{config::AppConfig, error::ErrorCode, logging, AppState};

use crate::cli::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match AppConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(ErrorCode::Failure as u8);
        }
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(ErrorCode::Failure as u8);
        }
    };

    tracing::debug!("Starting Elidune Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Data directory: {}", config.storage.data_dir.display());

    let mut state = AppState::open(config);

    let result = cli::run(cli.command, &mut state);
    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    ExitCode::from(cli::exit_status(&result))
}
