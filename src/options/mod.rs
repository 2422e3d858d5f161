//! Structured configuration patching
//!
//! The save pipeline for one option set: map a form submission onto the
//! field registry ([`apply_submission`]), then merge the registry's flat
//! values into the persisted YAML document ([`merge_options`]). Both halves
//! are parameterized by [`crate::registry::OptionSet`] rather than being
//! duplicated per set.

mod apply;
mod error;
mod persist;

pub use apply::{apply_submission, ApplyOutcome, Submission};
pub use error::{OptionsError, Result};
pub use persist::{load_document, merge_options, OPTIONS_KEY};
