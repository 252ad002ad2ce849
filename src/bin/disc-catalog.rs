//! disc-catalog CLI Binary
//!
//! Command-line driver for building and searching volume catalogs.

use anyhow::{Context, Result};
use clap::Parser;
use disc_catalog::cli::{map_error, Cli, RunContext};
use disc_catalog::config::ConfigLoader;
use disc_catalog::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("disc-catalog starting");

    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let context = RunContext::new(cli.config.clone(), cli.document.clone())
        .map_err(|e| anyhow::anyhow!(map_error(&e)))
        .context("Failed to initialize catalog store")?;
    info!(document = %context.document_path().display(), "Catalog document");

    context
        .execute(&cli.command)
        .map_err(|e| anyhow::anyhow!(map_error(&e)))
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose && cli.log_level.is_none() {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .map(|c| c.logging)
    .unwrap_or_default();

    if cli.verbose && cli.log_level.is_none() {
        config.level = "debug".to_string();
    }
    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.file = file.clone();
    }

    config
}
