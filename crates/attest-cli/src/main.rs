//! Attest CLI — entry point.
//!
//! Subcommands: init, prove, verify, history, log, role.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::AttestConfig;

/// Attest — selective-disclosure identity proof workflow.
#[derive(Parser, Debug)]
#[command(name = "attest", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "attest.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Run the subject flow: upload, extract, select, review, issue.
    Prove(commands::prove::ProveArgs),
    /// Resolve a proof identifier through the verification chain.
    Verify(commands::verify::VerifyArgs),
    /// List the current identity's issued proofs, newest first.
    History(commands::history::HistoryArgs),
    /// Show the verification log.
    Log(commands::log::LogArgs),
    /// Show or set the current identity's role mapping.
    Role(commands::role::RoleArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AttestConfig::load(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args, &cli.config),
        Commands::Prove(args) => commands::prove::run(args, &config).await,
        Commands::Verify(args) => commands::verify::run(args, &config).await,
        Commands::History(args) => commands::history::run(args, &config),
        Commands::Log(args) => commands::log::run(args, &config),
        Commands::Role(args) => commands::role::run(args, &config),
    }
}
