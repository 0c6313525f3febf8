//! calbot CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calbot_client::cli::Cli;
use calbot_client::commands;
use calbot_client::config::ClientConfig;
use calbot_client::error::ClientResult;
use calbot_client::output::OutputFormat;
use calbot_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ClientResult<String> {
    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    if let Some(events) = cli.events {
        config.calendar.events_file = Some(events);
    }
    if let Some(timezone) = cli.timezone {
        config.calendar.timezone = timezone;
    }

    let config_path = cli.config.unwrap_or_else(ClientConfig::default_path);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    commands::dispatch(cli.command, config, &config_path, format)
}
