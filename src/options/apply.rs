//! Request-to-field mapping
//!
//! Resolves a nested `{ tab: { field: raw } }` submission against a field
//! registry and overwrites the matching field values. Tab and field keys are
//! untrusted client input: every lookup is explicit, and a miss skips that
//! single update instead of aborting the save.

use indexmap::IndexMap;
use tracing::warn;

use super::error::OptionsError;
use crate::registry::{FieldRegistry, FieldValue};

/// Nested tab -> field -> raw value mapping decoded from a form submission
pub type Submission = IndexMap<String, IndexMap<String, String>>;

/// Result of mapping one submission onto a registry
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    /// Number of field values actually overwritten
    pub applied: usize,
    /// Per-field errors collected along the way (unknown keys, bad values)
    pub warnings: Vec<OptionsError>,
}

impl ApplyOutcome {
    /// True when every submitted field resolved and coerced
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Overwrite registry field values from a submission.
///
/// Mutates matching fields in place; persistence is the caller's concern.
/// Unknown tabs, unknown fields, and uncoercible values are collected as
/// warnings and the remaining fields still apply.
pub fn apply_submission(registry: &mut FieldRegistry, submission: &Submission) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    for (tab_key, raw_fields) in submission {
        if registry.tab(tab_key).is_none() {
            warn!(tab = %tab_key, "Submission names an undeclared tab, skipping");
            outcome.warnings.push(OptionsError::UnknownTab {
                tab: tab_key.clone(),
            });
            continue;
        }

        for (field_key, raw) in raw_fields {
            let Some(field) = registry.field_mut(tab_key, field_key) else {
                warn!(tab = %tab_key, field = %field_key, "Submission names an undeclared field, skipping");
                outcome.warnings.push(OptionsError::UnknownField {
                    tab: tab_key.clone(),
                    field: field_key.clone(),
                });
                continue;
            };

            match FieldValue::coerce(field.kind, raw) {
                Ok(value) => {
                    field.value = value;
                    outcome.applied += 1;
                }
                Err(reason) => {
                    warn!(tab = %tab_key, field = %field_key, %reason, "Submitted value rejected");
                    outcome.warnings.push(OptionsError::InvalidValue {
                        tab: tab_key.clone(),
                        field: field_key.clone(),
                        reason,
                    });
                }
            }
        }
    }

    outcome
}
