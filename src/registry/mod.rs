//! Field registry
//!
//! In-memory description of the configurable fields for one option set,
//! grouped into named tabs. The registry is built once at startup from a
//! YAML declaration document, seeded with current values from the persisted
//! options file, and mutated in place by form submissions.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::fmt;

mod field;

pub use field::{Field, FieldKind, FieldValue};

/// Which of the two independent option sets an operation targets.
///
/// The extension and theme save paths are identical apart from the registry
/// and file path they use, so everything downstream is parameterized by this
/// tag instead of being duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSet {
    /// Extension-level options
    Extension,
    /// Theme-level options
    Theme,
}

impl OptionSet {
    /// Form-field prefix and config-section name for this set
    pub fn as_str(self) -> &'static str {
        match self {
            OptionSet::Extension => "extension",
            OptionSet::Theme => "theme",
        }
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named group of related fields shown together in the UI
#[derive(Debug, Clone)]
pub struct Tab {
    /// Tab identifier
    pub key: String,
    /// Human-readable label for rendering
    pub label: Option<String>,
    /// Fields in declaration order
    pub fields: IndexMap<String, Field>,
}

/// Declaration document shape: tab key -> tab declaration
type Declarations = IndexMap<String, TabDecl>;

#[derive(Debug, Deserialize)]
struct TabDecl {
    label: Option<String>,
    fields: IndexMap<String, FieldDecl>,
}

#[derive(Debug, Deserialize)]
struct FieldDecl {
    kind: FieldKind,
    label: Option<String>,
    default: Option<FieldValue>,
}

/// Ordered collection of tabs for one option set
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    tabs: IndexMap<String, Tab>,
}

impl FieldRegistry {
    /// Build a registry from a YAML declaration document.
    ///
    /// The document maps tab keys to `{ label, fields }`, each field to
    /// `{ kind, label, default }`. Field keys must be unique across all
    /// tabs: the persisted options section is a flat mapping and cannot
    /// represent two fields with the same key.
    pub fn from_declarations(yaml: &str) -> Result<Self> {
        let decls: Declarations =
            serde_yaml::from_str(yaml).context("Failed to parse field declarations")?;

        let mut seen = HashSet::new();
        let mut tabs = IndexMap::new();
        for (tab_key, tab_decl) in decls {
            let mut fields = IndexMap::new();
            for (field_key, decl) in tab_decl.fields {
                if !seen.insert(field_key.clone()) {
                    bail!("Duplicate field key across tabs: {}", field_key);
                }
                let field = Field::new(field_key.clone(), decl.kind, decl.label, decl.default);
                fields.insert(field_key, field);
            }
            tabs.insert(
                tab_key.clone(),
                Tab {
                    key: tab_key,
                    label: tab_decl.label,
                    fields,
                },
            );
        }

        Ok(Self { tabs })
    }

    /// Overlay current values from a persisted flat options mapping.
    ///
    /// Keys with no declared field, and values that cannot represent the
    /// declared kind, are skipped; the field keeps its default.
    pub fn seed_values(&mut self, flat: &Mapping) {
        for (key, value) in flat {
            let Some(key) = key.as_str() else { continue };
            for tab in self.tabs.values_mut() {
                if let Some(field) = tab.fields.get_mut(key) {
                    if let Some(coerced) = FieldValue::from_yaml(field.kind, value) {
                        field.value = coerced;
                    }
                    break;
                }
            }
        }
    }

    /// Tabs in declaration order
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    /// Look up a tab by key
    pub fn tab(&self, key: &str) -> Option<&Tab> {
        self.tabs.get(key)
    }

    /// Look up a field for mutation, by tab key then field key
    pub fn field_mut(&mut self, tab_key: &str, field_key: &str) -> Option<&mut Field> {
        self.tabs.get_mut(tab_key)?.fields.get_mut(field_key)
    }

    /// Flat field-key -> value mapping for the persisted options section
    pub fn flat_values(&self) -> Mapping {
        let mut flat = Mapping::new();
        for tab in self.tabs.values() {
            for field in tab.fields.values() {
                flat.insert(Value::String(field.key.clone()), field.value.to_yaml());
            }
        }
        flat
    }

    /// True when no tabs are declared
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLS: &str = r#"
general:
  label: General
  fields:
    siteName:
      kind: string
      label: Site name
      default: Old
    showFooter:
      kind: bool
      default: true
appearance:
  fields:
    columns:
      kind: number
      default: 3
    menuItems:
      kind: list
"#;

    #[test]
    fn test_declarations_preserve_order() {
        let registry = FieldRegistry::from_declarations(DECLS).unwrap();
        let keys: Vec<&str> = registry.tabs().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["general", "appearance"]);

        let general = registry.tab("general").unwrap();
        let fields: Vec<&str> = general.fields.keys().map(String::as_str).collect();
        assert_eq!(fields, ["siteName", "showFooter"]);
    }

    #[test]
    fn test_duplicate_field_key_rejected() {
        let yaml = r#"
a:
  fields:
    dup:
      kind: string
b:
  fields:
    dup:
      kind: bool
"#;
        assert!(FieldRegistry::from_declarations(yaml).is_err());
    }

    #[test]
    fn test_flat_values_cover_all_tabs() {
        let registry = FieldRegistry::from_declarations(DECLS).unwrap();
        let flat = registry.flat_values();
        assert_eq!(flat.len(), 4);
        assert_eq!(
            flat.get("siteName"),
            Some(&Value::String("Old".to_string()))
        );
        assert_eq!(
            flat.get("columns"),
            Some(&Value::Number(serde_yaml::Number::from(3)))
        );
    }

    #[test]
    fn test_seed_values_overlays_matching_kinds() {
        let mut registry = FieldRegistry::from_declarations(DECLS).unwrap();
        let seeded: Mapping = serde_yaml::from_str(
            r#"
siteName: New
showFooter: not-a-bool
stray: 1
"#,
        )
        .unwrap();
        registry.seed_values(&seeded);

        let general = registry.tab("general").unwrap();
        assert_eq!(
            general.fields["siteName"].value,
            FieldValue::String("New".to_string())
        );
        // kind mismatch keeps the default
        assert_eq!(general.fields["showFooter"].value, FieldValue::Bool(true));
    }

    #[test]
    fn test_field_mut_lookup() {
        let mut registry = FieldRegistry::from_declarations(DECLS).unwrap();
        assert!(registry.field_mut("general", "siteName").is_some());
        assert!(registry.field_mut("general", "missing").is_none());
        assert!(registry.field_mut("missing", "siteName").is_none());
    }
}
