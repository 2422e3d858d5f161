//! YAML merge-and-persist
//!
//! One parameterized read-modify-write over an options file: parse the
//! existing document, replace the reserved `ui-options` section with the
//! registry's flat values, and write the whole document back. Every other
//! top-level key passes through unmodified.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::{OptionsError, Result};

/// Reserved top-level key holding the flat field-key -> value mapping
pub const OPTIONS_KEY: &str = "ui-options";

/// Load and parse an options file into its top-level mapping.
///
/// An empty document reads as an empty mapping; any other non-mapping
/// document (a bare scalar, a sequence) is a read error, as is a missing
/// or unparsable file.
pub fn load_document(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path).map_err(|e| OptionsError::DocumentRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| OptionsError::DocumentRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(OptionsError::DocumentRead {
            path: path.to_path_buf(),
            reason: format!("document root is not a mapping: {:?}", other),
        }),
    }
}

/// Merge the flat options mapping into the document at `path` and write it
/// back, fully replacing prior contents.
///
/// The reserved section is replaced (or inserted) wholesale; all other keys
/// keep their position and structure. Callers hold the option set's lock
/// across this whole read-modify-write sequence.
pub fn merge_options(path: &Path, flat: Mapping) -> Result<()> {
    let mut document = load_document(path)?;
    document.insert(Value::String(OPTIONS_KEY.to_string()), Value::Mapping(flat));

    let serialized =
        serde_yaml::to_string(&Value::Mapping(document)).map_err(|e| OptionsError::Persist {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;

    fs::write(path, serialized).map_err(|e| OptionsError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "Options file written");
    Ok(())
}
