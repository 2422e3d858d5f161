//! Field type definitions and value coercion

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Declared kind of a configurable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text
    String,
    /// On/off toggle
    Bool,
    /// Integer or float
    Number,
    /// Ordered list of strings
    List,
}

impl FieldKind {
    /// Value used when a field declares no default
    pub fn empty_value(self) -> FieldValue {
        match self {
            FieldKind::String => FieldValue::String(String::new()),
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Number => FieldValue::Number(serde_yaml::Number::from(0)),
            FieldKind::List => FieldValue::List(Vec::new()),
        }
    }
}

/// Current value of a field, typed per its declared kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text value
    String(String),
    /// Toggle value
    Bool(bool),
    /// Numeric value (integer or float)
    Number(serde_yaml::Number),
    /// List-of-strings value
    List(Vec<String>),
}

impl FieldValue {
    /// Coerce a raw form-posted string into a value of the given kind.
    ///
    /// Booleans accept the usual form vocabulary ("on", "true", "1", ...).
    /// Lists split on newlines, dropping blank lines.
    pub fn coerce(kind: FieldKind, raw: &str) -> Result<FieldValue, String> {
        match kind {
            FieldKind::String => Ok(FieldValue::String(raw.to_string())),
            FieldKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "1" | "yes" => Ok(FieldValue::Bool(true)),
                "off" | "false" | "0" | "no" | "" => Ok(FieldValue::Bool(false)),
                other => Err(format!("not a boolean: {:?}", other)),
            },
            FieldKind::Number => {
                let trimmed = raw.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Ok(FieldValue::Number(serde_yaml::Number::from(i)))
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    Ok(FieldValue::Number(serde_yaml::Number::from(f)))
                } else {
                    Err(format!("not a number: {:?}", trimmed))
                }
            }
            FieldKind::List => Ok(FieldValue::List(
                raw.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }

    /// Coerce a YAML value loaded from a persisted options section.
    ///
    /// Returns `None` when the value cannot represent the declared kind;
    /// the caller keeps the field's current value in that case.
    pub fn from_yaml(kind: FieldKind, value: &Value) -> Option<FieldValue> {
        match (kind, value) {
            (FieldKind::String, Value::String(s)) => Some(FieldValue::String(s.clone())),
            (FieldKind::Bool, Value::Bool(b)) => Some(FieldValue::Bool(*b)),
            (FieldKind::Number, Value::Number(n)) => Some(FieldValue::Number(n.clone())),
            (FieldKind::List, Value::Sequence(seq)) => {
                let items: Option<Vec<String>> = seq
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                items.map(FieldValue::List)
            }
            _ => None,
        }
    }

    /// Render as a YAML value for the persisted options section
    pub fn to_yaml(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::List(items) => {
                Value::Sequence(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// A single configurable value with identifier and metadata
#[derive(Debug, Clone)]
pub struct Field {
    /// Field identifier within its tab
    pub key: String,
    /// Declared value kind
    pub kind: FieldKind,
    /// Human-readable label for rendering
    pub label: Option<String>,
    /// Declared default value
    pub default: Option<FieldValue>,
    /// Current value, mutated by form submissions
    pub value: FieldValue,
}

impl Field {
    /// Build a field from its declaration, starting at the default value
    pub fn new(
        key: impl Into<String>,
        kind: FieldKind,
        label: Option<String>,
        default: Option<FieldValue>,
    ) -> Self {
        let key = key.into();
        let value = default.clone().unwrap_or_else(|| kind.empty_value());
        Self {
            key,
            kind,
            label,
            default,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_string() {
        let value = FieldValue::coerce(FieldKind::String, "hello").unwrap();
        assert_eq!(value, FieldValue::String("hello".to_string()));
    }

    #[test]
    fn test_coerce_bool_vocabulary() {
        for raw in ["on", "true", "1", "yes"] {
            assert_eq!(
                FieldValue::coerce(FieldKind::Bool, raw).unwrap(),
                FieldValue::Bool(true)
            );
        }
        for raw in ["off", "false", "0", "no", ""] {
            assert_eq!(
                FieldValue::coerce(FieldKind::Bool, raw).unwrap(),
                FieldValue::Bool(false)
            );
        }
        assert!(FieldValue::coerce(FieldKind::Bool, "maybe").is_err());
    }

    #[test]
    fn test_coerce_number_integer_stays_integer() {
        let value = FieldValue::coerce(FieldKind::Number, "42").unwrap();
        assert_eq!(value.to_yaml(), Value::Number(serde_yaml::Number::from(42)));

        let value = FieldValue::coerce(FieldKind::Number, "2.5").unwrap();
        assert_eq!(
            value.to_yaml(),
            Value::Number(serde_yaml::Number::from(2.5))
        );

        assert!(FieldValue::coerce(FieldKind::Number, "abc").is_err());
    }

    #[test]
    fn test_coerce_list_splits_lines() {
        let value = FieldValue::coerce(FieldKind::List, "one\ntwo\n\n  three  ").unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string()
            ])
        );
    }

    #[test]
    fn test_from_yaml_rejects_kind_mismatch() {
        let yaml = Value::String("text".to_string());
        assert!(FieldValue::from_yaml(FieldKind::Bool, &yaml).is_none());
        assert!(FieldValue::from_yaml(FieldKind::String, &yaml).is_some());
    }

    #[test]
    fn test_field_starts_at_default() {
        let field = Field::new(
            "siteName",
            FieldKind::String,
            Some("Site name".to_string()),
            Some(FieldValue::String("Old".to_string())),
        );
        assert_eq!(field.value, FieldValue::String("Old".to_string()));

        let bare = Field::new("flag", FieldKind::Bool, None, None);
        assert_eq!(bare.value, FieldValue::Bool(false));
    }
}
