//! `predictor` binary.

use std::process::ExitCode;

use clap::Parser;
use predictor_cli::cli::{Cli, dispatch_command};
use predictor_cli::config::AppConfig;
use predictor_cli::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let target = logging::log_target(cli.debug, cli.is_headless());
    let _log_guard = match logging::init(&target, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to set up logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
