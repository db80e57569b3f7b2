// SPDX-License-Identifier: Apache-2.0

//! Configuration management for the vulnlab demo host.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! None of the fixtures read configuration: the hardcoded values they carry
//! are the point. This only drives where the demo host listens.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `VULNLAB_`)
//! 2. Config file: `~/.config/vulnlab/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Listen on all interfaces (only inside a disposable lab network!)
//! VULNLAB_SERVER__HOST=0.0.0.0 cargo run -p vulnlab-server
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::VulnlabError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Demo host settings.
    pub server: ServerConfig,
}

/// Demo host settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (default: loopback).
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Returns the vulnlab configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/vulnlab`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("vulnlab");
    }
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".config")
        .join("vulnlab")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `VULNLAB_` and double underscore
/// for nested keys (e.g., `VULNLAB_SERVER__PORT`).
pub fn load_config() -> Result<AppConfig, VulnlabError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("VULNLAB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
