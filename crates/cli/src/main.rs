//! `ecotrack` command-line client
//!
//! Loads configuration (file, `.env`, `ECOTRACK_*` variables, flags), runs
//! one subcommand against the API and prints its result as JSON. Failures
//! are printed as JSON on stderr with a non-zero exit code.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ecotrack_domain::Config;
use ecotrack_infra::{config, init_tracing, ApiClient};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Optional .env file; missing is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.logging).context("failed to initialise logging")?;

    let client = ApiClient::from_config(&config).context("failed to create API client")?;
    match commands::run(&client, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            eprintln!("{}", serde_json::to_string_pretty(&commands::error_report(&err))?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::apply_env_overrides(config::load_from_file(Some(path.clone()))?)?,
        None => config::load()?,
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if cli.verbose {
        config.logging.filter = "debug".to_string();
    }
    Ok(config)
}
