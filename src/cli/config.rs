//! Session configuration
//!
//! Read from a JSON file. Every field is optional:
//!
//! ```json
//! { "default_data_file": "items.csv", "log_filter": "warn", "echo_script_commands": true }
//! ```
//!
//! Lookup order:
//! 1. `$ITEMVAULT_CONFIG`, which must point at a readable file
//! 2. `./itemvault.json`, if present
//! 3. built-in defaults

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ITEMVAULT_CONFIG";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "itemvault.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data file used when none is given on the command line or at the prompt
    #[serde(default = "default_data_file")]
    pub default_data_file: String,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Print each script line before running it
    #[serde(default = "default_echo_script_commands")]
    pub echo_script_commands: bool,
}

fn default_data_file() -> String {
    "items.csv".to_string()
}
fn default_log_filter() -> String {
    "warn".to_string()
}
fn default_echo_script_commands() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_data_file: default_data_file(),
            log_filter: default_log_filter(),
            echo_script_commands: default_echo_script_commands(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)?;

        config.validate()?;

        Ok(config)
    }

    /// Find and load the configuration for this process
    pub fn discover() -> CliResult<Self> {
        Self::discover_from(std::env::var_os(CONFIG_ENV_VAR), Path::new(DEFAULT_CONFIG_FILE))
    }

    fn discover_from(explicit: Option<OsString>, fallback: &Path) -> CliResult<Self> {
        if let Some(path) = explicit.filter(|p| !p.is_empty()) {
            return Self::load(&PathBuf::from(path));
        }
        if fallback.is_file() {
            return Self::load(fallback);
        }
        Ok(Self::default())
    }

    fn validate(&self) -> CliResult<()> {
        if self.default_data_file.trim().is_empty() {
            return Err(CliError::config_error("default_data_file must not be empty"));
        }

        if self.log_filter.trim().is_empty() {
            return Err(CliError::config_error("log_filter must not be empty"));
        }

        Ok(())
    }
}
