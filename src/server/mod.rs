//! Server orchestration
//!
//! Builds the shared application state (one seeded field registry per
//! option set, each behind its own lock), binds the listener, and serves
//! the web surface until shutdown.
//!
//! Each option set's lock is held across the whole read-modify-write
//! sequence against its options file, so concurrent requests within this
//! process serialize per file. Cross-process writers still race; last
//! writer wins. That is a documented limitation of a single-operator admin
//! page, not something this server tries to arbitrate.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::options::{self, OPTIONS_KEY};
use crate::registry::{FieldRegistry, OptionSet};
use crate::web;

/// Mutable state for one option set: its registry and persisted file path
#[derive(Debug)]
pub struct OptionSetState {
    /// Field registry for this set
    pub registry: FieldRegistry,
    /// Path of the YAML document the set persists into
    pub options_path: PathBuf,
}

/// Shared application state handed to the web handlers
#[derive(Clone)]
pub struct AppState {
    extension: Arc<Mutex<OptionSetState>>,
    theme: Arc<Mutex<OptionSetState>>,
}

impl AppState {
    /// Build state from two prepared option set states
    pub fn new(extension: OptionSetState, theme: OptionSetState) -> Self {
        Self {
            extension: Arc::new(Mutex::new(extension)),
            theme: Arc::new(Mutex::new(theme)),
        }
    }

    /// The lock guarding one option set
    pub fn set(&self, set: OptionSet) -> &Arc<Mutex<OptionSetState>> {
        match set {
            OptionSet::Extension => &self.extension,
            OptionSet::Theme => &self.theme,
        }
    }
}

/// UI options server
///
/// Owns the configuration and shared state, and runs the HTTP surface.
pub struct OptionsServer {
    config: Config,
    state: AppState,
}

impl OptionsServer {
    /// Load both option sets and build the server.
    ///
    /// The field declarations must load; a missing or unreadable options
    /// file at startup only logs a warning and leaves declared defaults in
    /// place (the file still has to exist by save time).
    pub fn new(config: Config) -> Result<Self> {
        let extension = load_option_set(&config, OptionSet::Extension)?;
        let theme = load_option_set(&config, OptionSet::Theme)?;

        Ok(Self {
            config,
            state: AppState::new(extension, theme),
        })
    }

    /// Shared state, for wiring the router in tests
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Bind the listener and serve until ctrl-c
    pub async fn run(self) -> Result<()> {
        let addr = &self.config.server.listen_addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context(format!("Failed to bind {}", addr))?;
        info!(%addr, "Listening");

        let router = web::router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}

/// Build one option set's state: declarations, then seeded current values
fn load_option_set(config: &Config, set: OptionSet) -> Result<OptionSetState> {
    let files = config.option_set(set);

    let declarations = std::fs::read_to_string(&files.fields_file).context(format!(
        "Failed to read {} field declarations: {:?}",
        set, files.fields_file
    ))?;
    let mut registry = FieldRegistry::from_declarations(&declarations)
        .context(format!("Invalid {} field declarations", set))?;

    match options::load_document(&files.options_file) {
        Ok(document) => {
            if let Some(flat) = document.get(OPTIONS_KEY).and_then(serde_yaml::Value::as_mapping) {
                registry.seed_values(flat);
            }
            info!(set = %set, path = %files.options_file.display(), "Option set loaded");
        }
        Err(e) => {
            warn!(set = %set, error = %e, "Options file not seeded, using declared defaults");
        }
    }

    Ok(OptionSetState {
        registry,
        options_path: files.options_file.clone(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install ctrl-c handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn test_config(dir: &TempDir) -> Config {
        let mut config = Config::default_config();
        config.extension.fields_file = write_file(
            dir,
            "ext_fields.yml",
            "general:\n  fields:\n    siteName:\n      kind: string\n      default: Old\n",
        );
        config.extension.options_file = write_file(
            dir,
            "ext_options.yml",
            "name: site\nui-options:\n  siteName: Seeded\n",
        );
        config.theme.fields_file = write_file(
            dir,
            "theme_fields.yml",
            "colors:\n  fields:\n    accent:\n      kind: string\n",
        );
        config.theme.options_file = write_file(dir, "theme_options.yml", "name: theme\n");
        config
    }

    #[test]
    fn test_new_seeds_registry_from_options_file() {
        let dir = TempDir::new().unwrap();
        let server = OptionsServer::new(test_config(&dir)).unwrap();
        let state = server.state();

        let guard = state.set(OptionSet::Extension).try_lock().unwrap();
        let tab = guard.registry.tab("general").unwrap();
        assert_eq!(
            tab.fields["siteName"].value,
            crate::registry::FieldValue::String("Seeded".to_string())
        );
    }

    #[test]
    fn test_missing_options_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.extension.options_file = dir.path().join("absent.yml");

        let server = OptionsServer::new(config).unwrap();
        let state = server.state();
        let guard = state.set(OptionSet::Extension).try_lock().unwrap();
        assert_eq!(
            guard.registry.tab("general").unwrap().fields["siteName"].value,
            crate::registry::FieldValue::String("Old".to_string())
        );
    }

    #[test]
    fn test_missing_declarations_fail_startup() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        config.theme.fields_file = dir.path().join("absent_fields.yml");
        assert!(OptionsServer::new(config).is_err());
    }
}
