//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables
//! - CLI arguments

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod types;

pub use types::{LoggingConfig, OptionSetConfig, ServerConfig, YamlConfig};

use crate::registry::OptionSet;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Extension option set files
    pub extension: OptionSetConfig,
    /// Theme option set files
    pub theme: OptionSetConfig,
    /// YAML serialization configuration
    #[serde(default)]
    pub yaml: YamlConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            server: ServerConfig {
                listen_addr: "127.0.0.1:8710".to_string(),
            },
            extension: OptionSetConfig {
                fields_file: PathBuf::from("config/extension_fields.yml"),
                options_file: PathBuf::from("config/extension_options.yml"),
            },
            theme: OptionSetConfig {
                fields_file: PathBuf::from("config/theme_fields.yml"),
                options_file: PathBuf::from("config/theme_options.yml"),
            },
            yaml: YamlConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .context("Invalid listen address")?;

        if self.yaml.inline_depth == 0 {
            bail!("yaml.inline_depth must be at least 1");
        }

        // the two sets must not share a persisted file
        if self.extension.options_file == self.theme.options_file {
            bail!(
                "Extension and theme option sets share the same options file: {:?}",
                self.extension.options_file
            );
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => bail!("Invalid log level: {}", other),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, listen: Option<String>, port: Option<u16>) -> Self {
        if let Some(listen_addr) = listen {
            self.server.listen_addr = listen_addr;
        }
        if let Some(port) = port {
            if let Ok(mut addr) = self.server.listen_addr.parse::<SocketAddr>() {
                addr.set_port(port);
                self.server.listen_addr = addr.to_string();
            }
        }

        self
    }

    /// File configuration for the given option set
    pub fn option_set(&self, set: OptionSet) -> &OptionSetConfig {
        match set {
            OptionSet::Extension => &self.extension,
            OptionSet::Theme => &self.theme,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
