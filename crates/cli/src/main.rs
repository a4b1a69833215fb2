//! Hisaab CLI - FBR Digital Invoicing harness.
//!
//! # Usage
//!
//! ```bash
//! # Run the local mapping pipeline across every scenario
//! hisaab sweep
//!
//! # Also drive validate/post against the FBR sandbox
//! hisaab sweep --submit
//!
//! # Check configuration and sandbox connectivity
//! hisaab check-config
//!
//! # Submit a single order from a JSON file
//! hisaab submit order.json
//! ```
//!
//! # Commands
//!
//! - `sweep` - Map a sample order per scenario and report pass/fail
//! - `check-config` - Validate configuration and probe the sandbox
//! - `submit` - Run the full pipeline for one order file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hisaab")]
#[command(author, version, about = "Hisaab FBR invoicing tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep every FBR scenario through the local pipeline
    Sweep {
        /// Also validate and post each invoice against the sandbox
        #[arg(long)]
        submit: bool,
    },
    /// Validate configuration and probe sandbox connectivity
    CheckConfig,
    /// Submit one order from a JSON file
    Submit {
        /// Path to the order JSON file
        path: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Sweep { submit } => commands::sweep::run(submit).await?,
        Commands::CheckConfig => commands::check_config::run().await?,
        Commands::Submit { path } => commands::submit::run(&path).await?,
    }
    Ok(())
}
