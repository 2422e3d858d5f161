//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8710")
    pub listen_addr: String,
}

/// Files backing one option set (extension or theme)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSetConfig {
    /// YAML document declaring the set's tabs and fields
    pub fields_file: PathBuf,

    /// YAML document the `ui-options` section is persisted into
    pub options_file: PathBuf,
}

/// YAML serialization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YamlConfig {
    /// Nesting depth beyond which collections would be emitted inline.
    /// The serializer emits block style throughout; the knob is kept for
    /// compatibility with existing config files.
    pub inline_depth: usize,
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self { inline_depth: 7 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
