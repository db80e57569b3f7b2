// SPDX-License-Identifier: Apache-2.0

//! Error types for vulnlab.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries should use `anyhow::Result` for top-level error handling.
//!
//! The fixtures in this crate swallow their own failures on purpose; these
//! types only cover the demo host plumbing and the safe counterparts.

use thiserror::Error;

/// Errors that can occur outside of the deliberately silent fixtures.
#[derive(Error, Debug)]
pub enum VulnlabError {
    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for VulnlabError {
    fn from(err: config::ConfigError) -> Self {
        VulnlabError::Config {
            message: err.to_string(),
        }
    }
}
