//! pipeline-cache CLI entry point.

use clap::Parser;

use pipeline_cache::cli::{self, Cli};
use pipeline_cache::infrastructure::config::ConfigLoader;
use pipeline_cache::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => cli::handle_error(err.context("Failed to load configuration"), cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging).and_then(|log_config| LoggerImpl::init(&log_config)) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err.context("Failed to initialize logging"), cli.json),
    };

    if let Err(err) = cli::commands::execute(cli.command, &config, cli.json).await {
        cli::handle_error(err, cli.json);
    }
}
