//! Estate CLI entry point

use anyhow::Context;
use clap::Parser;
use estate::cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("ESTATE_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => estate::cli::serve::run(args)
            .await
            .context("estate serve failed"),
        Commands::Init(args) => estate::cli::init::run(args)
            .await
            .context("estate init failed"),
    }
}
