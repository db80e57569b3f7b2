// SPDX-License-Identifier: Apache-2.0

//! Command-line interface for the demo host.
//!
//! Flags override values from the config file and `VULNLAB_` environment.

use clap::Parser;

/// Demo HTTP host for deliberately vulnerable fixtures.
#[derive(Debug, Parser)]
#[command(name = "vulnlab-server", version, about)]
pub struct Cli {
    /// Address to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides `server.port`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Print the fixture catalog as JSON and exit.
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging for vulnlab crates.
    #[arg(short, long)]
    pub verbose: bool,
}
