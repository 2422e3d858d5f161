//! Option-save error types
//!
//! Taxonomy for the apply/persist pipeline. Lookup and value errors are
//! per-field and recoverable (the offending field is skipped and reported);
//! document and write errors abort the save for their option set.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for option-save operations
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Errors raised while applying a submission and persisting the options file
#[derive(Error, Debug)]
pub enum OptionsError {
    /// Submitted tab key not declared in the registry
    #[error("Unknown tab: {tab}")]
    UnknownTab {
        /// Submitted tab key
        tab: String,
    },

    /// Submitted field key not declared in its tab
    #[error("Unknown field: {tab}.{field}")]
    UnknownField {
        /// Tab the field was submitted under
        tab: String,
        /// Submitted field key
        field: String,
    },

    /// Submitted value does not coerce to the field's declared kind
    #[error("Invalid value for {tab}.{field}: {reason}")]
    InvalidValue {
        /// Tab the field was submitted under
        tab: String,
        /// Field key
        field: String,
        /// Coercion failure detail
        reason: String,
    },

    /// Options file missing or not valid YAML at save time
    #[error("Failed to read options file {path}: {reason}")]
    DocumentRead {
        /// Path of the options file
        path: PathBuf,
        /// Read or parse failure detail
        reason: String,
    },

    /// Options file could not be written back
    #[error("Failed to write options file {path}: {source}")]
    Persist {
        /// Path of the options file
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl OptionsError {
    /// Per-field errors are skipped with a warning; the save continues.
    /// Document and write errors abort the save for their option set.
    pub fn is_field_level(&self) -> bool {
        matches!(
            self,
            OptionsError::UnknownTab { .. }
                | OptionsError::UnknownField { .. }
                | OptionsError::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_level_classification() {
        assert!(OptionsError::UnknownTab {
            tab: "x".to_string()
        }
        .is_field_level());
        assert!(OptionsError::UnknownField {
            tab: "x".to_string(),
            field: "y".to_string()
        }
        .is_field_level());
        assert!(!OptionsError::DocumentRead {
            path: PathBuf::from("a.yml"),
            reason: "missing".to_string()
        }
        .is_field_level());
    }

    #[test]
    fn test_error_messages_name_the_keys() {
        let err = OptionsError::UnknownField {
            tab: "general".to_string(),
            field: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown field: general.bogus");
    }
}
