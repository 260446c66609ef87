mod config;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use vidiwise_logging::{vidiwise_debug, vidiwise_info};

use config::{AppConfig, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)
        .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    vidiwise_logging::initialize(config.log_destination(), level);
    vidiwise_info!("Starting vidiwise against {}", config.server_url);
    vidiwise_debug!("Configuration: {:?}", config);

    shell::run(&config, cli.url)
}
