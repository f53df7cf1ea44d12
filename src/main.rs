//! sqlpal - MySQL script runner
//!
//! Runs SQL scripts against a MySQL database, keeps colored session
//! transcripts with log rotation, and sources credentials from the
//! environment or a credentials file.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod db;
mod error;
mod logs;
mod query;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    init_logging(cli.debug);

    // Execute the command
    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting sqlpal");

    // Config subcommands must work with an incomplete configuration
    let config = match &cli.command {
        Commands::Config { .. } => config::load_config_no_validation().await?,
        _ => config::load_config().await?,
    };

    cli.execute(config).await?;

    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "sqlpal=debug" } else { "sqlpal=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
