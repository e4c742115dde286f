//! CLI command definitions and handlers

pub mod init;
pub mod serve;

use clap::{Parser, Subcommand};

const LONG_ABOUT: &str = r#"
API server for a real-estate marketing site.

Serves property listings, page copy, the region guide and the inquiry
funnel as JSON under /api, persisted as one JSON file per entity in a
data directory.

QUICK START:
    1. estate init                    Write default data files
    2. ESTATE_ADMIN_PASSWORD=... \
       estate serve                   Start the API on localhost:3000

CONFIGURATION:
    estate.toml in $ESTATE_HOME (or the platform config dir), overridden by
    ESTATE_DATA_DIR, ESTATE_ADMIN_PASSWORD and ESTATE_PORT, then by flags.

LOGGING:
    ESTATE_LOG=info estate serve      Log level via ESTATE_LOG (env-filter syntax)
"#;

/// Real-estate site API server
#[derive(Parser, Debug)]
#[command(name = "estate")]
#[command(author, version)]
#[command(about = "Real-estate site API server")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the JSON API
    #[command(visible_alias = "s")]
    Serve(serve::ServeArgs),

    /// Write default page documents and empty lists into the data directory
    Init(init::InitArgs),
}
