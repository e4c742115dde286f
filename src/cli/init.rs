//! Init command implementation

use clap::Args;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::model::bootstrap;
use crate::store::JsonStore;

/// Arguments for the init command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    estate init                       Create missing files in ./data
    estate init -d /srv/site/data     Use a specific data directory
    estate init --force               Reset every file to its default")]
pub struct InitArgs {
    /// Data directory (default: from config, else ./data)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

/// Run the init command
pub async fn run(args: InitArgs) -> Result<()> {
    let config = Config::load()?;
    let data_dir = args.data_dir.unwrap_or(config.storage.data_dir);

    let store = JsonStore::open(&data_dir)?;
    let written = bootstrap(&store, args.force).await?;

    if written.is_empty() {
        println!("All data files already exist in {}", data_dir.display());
    } else {
        for file in &written {
            println!("  wrote {}", store.path(file).display());
        }
        println!("Initialized {} file(s)", written.len());
    }
    Ok(())
}
