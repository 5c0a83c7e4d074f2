//! Command dispatch.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, bail};
use predictor_client::PredictorClient;
use tracing::debug;

use super::args::{Cli, Commands};
use crate::config::AppConfig;

/// Run the selected command, or the interactive form when none was given.
pub async fn dispatch_command(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    let client = PredictorClient::new(&config.api)?;
    debug!(api_url = %config.api.api_url, "prediction service");

    match cli.command {
        None => {
            if !predictor_tui::is_terminal() {
                bail!(
                    "The interactive form needs a terminal. \
                     Use `predictor predict` for non-interactive use."
                );
            }
            predictor_tui::run(Arc::new(client)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Predict(args)) => args.run(&client).await,
        Some(Commands::Reference(args)) => args.run(&client).await,
    }
}
