mod app;
mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::app::AppError;
use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref());

    let result = match Config::from_cli(cli) {
        Ok(config) => app::run(&config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if let Some(hint) = e.hint() {
                info!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}
