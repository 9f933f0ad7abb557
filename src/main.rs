use std::process::ExitCode;

use clap::Parser;

use sysupgrade_server::cli::Cli;
use sysupgrade_server::config::schema::DEFAULT_LOG_LEVEL;
use sysupgrade_server::lifecycle::{self, StartupError};
use sysupgrade_server::observability;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            let level = cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
            observability::init_logging(level);
            StartupError::from(e).log();
            return ExitCode::FAILURE;
        }
    };

    observability::init_logging(&config.log_level);
    tracing::info!("sysupgrade-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.bind_address(),
        file = %config.file_path().display(),
        "Configuration loaded"
    );

    match lifecycle::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.log();
            ExitCode::FAILURE
        }
    }
}
