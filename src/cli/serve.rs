//! Serve command implementation

use clap::Args;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::error::Result;

/// Arguments for the serve command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    estate serve                      Serve on localhost:3000
    estate serve --port 8080          Use custom port
    estate serve --host 0.0.0.0       Listen on all interfaces
    estate serve -d /srv/site/data    Use a specific data directory")]
pub struct ServeArgs {
    /// Data directory (default: from config, else ./data)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Open the health endpoint in a browser once listening
    #[arg(long)]
    pub open: bool,
}

impl ServeArgs {
    /// Flags take precedence over file and environment configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);
    crate::web::server::run(config, args.open).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            data_dir: Some(PathBuf::from("/srv/data")),
            host: None,
            port: Some(9000),
            open: false,
        };
        args.apply(&mut config);

        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }
}
