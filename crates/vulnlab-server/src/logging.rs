// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the demo host.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: info for vulnlab, warn for sqlx
//! cargo run -p vulnlab-server
//!
//! # Debug output, including each fixture invocation
//! RUST_LOG=vulnlab_core=debug,vulnlab_server=debug cargo run -p vulnlab-server
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default directives when `RUST_LOG` is unset.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "vulnlab_server=debug,vulnlab_core=debug,sqlx=warn,reqwest=warn"
    } else {
        "vulnlab_server=info,vulnlab_core=info,sqlx=warn,reqwest=error"
    }
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` picks between info and
/// debug for the vulnlab crates. Logs go to stderr so `--list` output on
/// stdout stays machine-readable.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
