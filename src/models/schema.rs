use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::core::Record;

const HYPHENATED_LEN: usize = 36;

/// Per-field validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // First failure per field wins
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        trim: bool,
        min_len: usize,
        message: &'static str,
    },
    Uuid,
    Number {
        min: Option<f64>,
    },
}

/// Value substituted when the field is absent from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    None,
    Empty,
    GeneratedUuid,
}

impl FieldDefault {
    fn produce(&self) -> Option<Value> {
        match self {
            FieldDefault::None => None,
            FieldDefault::Empty => Some(Value::String(String::new())),
            FieldDefault::GeneratedUuid => Some(Value::String(Uuid::now_v7().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

impl FieldRule {
    /// Trimmed text that must not be blank, defaulting to ""
    pub fn required_text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text { trim: true, min_len: 1, message: "Required" },
            default: FieldDefault::Empty,
        }
    }

    pub fn uuid(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Uuid, default: FieldDefault::None }
    }

    pub fn number(name: &'static str, min: Option<f64>) -> Self {
        Self { name, kind: FieldKind::Number { min }, default: FieldDefault::None }
    }

    pub fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    fn check(&self, value: &Value) -> Result<Value, String> {
        match &self.kind {
            FieldKind::Text { trim, min_len, message } => {
                let s = value.as_str().ok_or_else(|| "Expected string".to_string())?;
                let s = if *trim { s.trim() } else { s };
                if s.chars().count() < *min_len {
                    return Err(message.to_string());
                }
                Ok(Value::String(s.to_string()))
            }
            FieldKind::Uuid => {
                let s = value.as_str().ok_or_else(|| "Expected string".to_string())?;
                // Hyphenated form only; braced, urn and simple forms differ in length
                let parsed = Uuid::try_parse(s)
                    .ok()
                    .filter(|_| s.len() == HYPHENATED_LEN)
                    .ok_or_else(|| "Invalid uuid".to_string())?;
                Ok(Value::String(parsed.hyphenated().to_string()))
            }
            FieldKind::Number { min } => {
                let n = value.as_f64().ok_or_else(|| "Expected number".to_string())?;
                if let Some(min) = min {
                    if n < *min {
                        return Err(format!("Number must be greater than or equal to {}", min));
                    }
                }
                Ok(value.clone())
            }
        }
    }
}

/// Structural validator for the editable fields of one model type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationSchema {
    rules: Vec<FieldRule>,
}

impl ValidationSchema {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate an input object, returning the cleaned record.
    ///
    /// Absent fields take their default before being checked. Fields the
    /// schema does not name are dropped.
    pub fn validate(&self, input: &Value) -> Result<Record, ValidationErrors> {
        let empty = Map::new();
        let object = match input {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                let mut errors = ValidationErrors::default();
                errors.insert("_root", "Expected object");
                return Err(errors);
            }
        };

        let mut cleaned = Record::new();
        let mut errors = ValidationErrors::default();

        for rule in &self.rules {
            let value = match object.get(rule.name) {
                Some(Value::Null) | None => rule.default.produce(),
                Some(v) => Some(v.clone()),
            };

            let Some(value) = value else {
                errors.insert(rule.name, "Required");
                continue;
            };

            match rule.check(&value) {
                Ok(v) => {
                    cleaned.insert(rule.name.to_string(), v);
                }
                Err(message) => errors.insert(rule.name, message),
            }
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}
