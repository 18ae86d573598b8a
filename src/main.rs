//! Pilgrim Site server binary.
//!
//! # Usage
//!
//! ```bash
//! # Start with the saved settings (or defaults)
//! pilgrim-site
//!
//! # Production mode with a remote site config
//! pilgrim-site --mode production --remote-config-url https://example.com/siteConfig.json
//!
//! # Remember the port for later runs
//! pilgrim-site --port 8080 --save
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pilgrim_site::branding::APP_DESCRIPTION;
use pilgrim_site::config::{BuildMode, Config};
use pilgrim_site::web;

/// Pilgrim Site - landing page server
#[derive(Parser, Debug)]
#[command(author, version, about = APP_DESCRIPTION, long_about = None)]
struct Args {
    /// Host to bind to (overrides the settings file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the settings file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Settings file to use instead of the platform default
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Build mode; production enables the remote config refresh
    #[arg(short, long, value_enum)]
    mode: Option<BuildMode>,

    /// URL of the runtime site config
    #[arg(long, value_name = "URL")]
    remote_config_url: Option<String>,

    /// Write the resolved settings back to the settings file
    #[arg(long)]
    save: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Loads the settings file and applies the command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load().unwrap_or_else(|e| {
                warn!("Failed to load settings, using defaults: {:#}", e);
                Config::default()
            }),
        };

        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(mode) = self.mode {
            config.site.mode = mode;
        }
        if let Some(url) = &self.remote_config_url {
            config.site.remote_config_url = Some(url.clone());
        }

        config.validate().context("Invalid settings")?;
        Ok(config)
    }

    /// Persists `config` to the settings file in use.
    fn save_config(&self, config: &Config) -> anyhow::Result<()> {
        match &self.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("Saved settings");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = args.resolve_config()?;
    if args.save {
        args.save_config(&config)?;
    }

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address()))?;

    info!("Site config mode: {}", config.site.mode);

    web::run_server(config, addr).await
}
