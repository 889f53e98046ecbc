//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and configuration,
//! and starts either the report form server or the interactive terminal mode.

mod api;
mod cli;
mod config;
mod constants;
mod db;
mod errors;
mod export;
mod interactive;
mod llm;
mod report;
mod schema;
mod utils;

use api::AppState;
use clap::Parser;
use cli::Command;
use config::AppConfig;
use db::Database;
use errors::Error;
use export::MarkdownExporter;
use llm::LlmClient;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables and configuration
/// 4. Run the selected command
#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let interactive = matches!(cli.command, Command::Write { .. });
    utils::init_logging(&cli.logging_level, cli.log_file || interactive, !interactive);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> Result<(), Error> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    info!(
        "Using model {} at {} (timeout {:?})",
        config.model, config.endpoint, config.timeout
    );

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.listen_port = port;
            }
            let state = AppState {
                llm: Arc::new(LlmClient::from_config(&config)?),
                exporter: Arc::new(MarkdownExporter::new(&config.documents_dir)),
                documents_dir: config.documents_dir.clone(),
                database: Database::new(&config.database_path)?,
                temperatures: config.temperatures.clone(),
            };
            api::server::launch_server(config.listen_port, state).await?;
        }
        Command::Write {
            output_dir,
            print,
            temperature,
        } => {
            if let Some(dir) = output_dir {
                config.documents_dir = dir;
            }
            let temperature = match temperature {
                Some(t) if (0.0..=constants::MAX_TEMPERATURE).contains(&t) => t,
                Some(t) => {
                    return Err(Error::InvalidConfig(format!(
                        "temperature {} outside 0.0..={}",
                        t,
                        constants::MAX_TEMPERATURE
                    )))
                }
                None => config
                    .temperatures
                    .first()
                    .copied()
                    .unwrap_or(constants::DEFAULT_TEMPERATURES[0]),
            };
            let llm = LlmClient::from_config(&config)?;
            let exporter = MarkdownExporter::new(&config.documents_dir);
            let session = interactive::Session::new(&llm, &exporter, temperature, print);
            interactive::run(session).await?;
        }
    }
    Ok(())
}
