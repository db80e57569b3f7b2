// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the vulnlab demo host.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use vulnlab_core::{all_fixtures, load_config};
use vulnlab_server::AppState;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if cli.list {
        println!("{}", serde_json::to_string_pretty(all_fixtures())?);
        return Ok(());
    }

    let mut config = load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(host) = cli.host {
        debug!("Overriding host to: {host}");
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        debug!("Overriding port to: {port}");
        config.server.port = port;
    }

    let state = AppState::new()
        .await
        .context("Failed to initialize fixture state")?;

    vulnlab_server::run_http(&config.server.host, config.server.port, state).await
}
