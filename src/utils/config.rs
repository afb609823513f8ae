// src/utils/config.rs
//! Lab configuration
//!
//! Loaded from an optional `agentnet-lab.{toml,yaml,json}` file (or the file
//! named by `AGENTNET_CONFIG`), then overridden by `AGENTNET__*` environment
//! variables, e.g. `AGENTNET__LOGGING__LEVEL=debug`.

use crate::utils::errors::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default config file stem
pub const DEFAULT_CONFIG_FILE: &str = "agentnet-lab";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "AGENTNET_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
    pub console: ConsoleConfig,

    /// Scenario the binary runs when none is given on the command line
    pub scenario: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            logging: LoggingConfig::default(),
            console: ConsoleConfig::default(),
            scenario: "greeting".to_string(),
        }
    }
}

/// Participant thread settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Prefix of each participant thread's name
    pub thread_name_prefix: String,

    /// Stack size of participant threads in bytes (platform default if unset)
    pub stack_size: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "agent-".to_string(),
            stack_size: None,
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Participant console settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Write participant `print` output to stdout
    pub enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LabConfig {
    /// Load from the default file (if any) and the environment
    pub fn load() -> Result<Self> {
        let file = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => File::with_name(&path).required(true),
            Err(_) => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("AGENTNET").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file only
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
