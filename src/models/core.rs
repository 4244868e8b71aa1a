use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

use super::schema::ValidationErrors;

/// A record as exchanged with the data service and rendered by the model view.
pub type Record = Map<String, Value>;

/// Audit fields carried by every record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreRecordFields {
    pub created_at: String,
    pub created_by: String,
    #[serde(default)]
    pub deleted_at: String,
    #[serde(default)]
    pub deleted_by: String,
}

impl CoreRecordFields {
    /// Decode the audit fields out of a record, enforcing a non-empty `createdBy`
    pub fn from_record(record: &Record) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let text = |field: &str, errors: &mut ValidationErrors, required: bool| -> String {
            match record.get(field) {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) if !required => String::new(),
                None | Some(Value::Null) => {
                    errors.insert(field, "Required");
                    String::new()
                }
                Some(_) => {
                    errors.insert(field, "Expected string");
                    String::new()
                }
            }
        };

        let created_at = text("createdAt", &mut errors, true);
        let created_by = text("createdBy", &mut errors, true);
        let deleted_at = text("deletedAt", &mut errors, false);
        let deleted_by = text("deletedBy", &mut errors, false);

        if created_by.is_empty() && !errors.contains("createdBy") {
            errors.insert("createdBy", "Required");
        }

        if errors.is_empty() {
            Ok(Self { created_at, created_by, deleted_at, deleted_by })
        } else {
            Err(errors)
        }
    }

    pub fn is_deleted(&self) -> bool {
        !self.deleted_at.is_empty()
    }

    /// The deletion timestamp wins over the creation timestamp
    pub fn updated_at(&self) -> &str {
        if self.is_deleted() {
            &self.deleted_at
        } else {
            &self.created_at
        }
    }
}

/// `updatedAt` for a raw record, without requiring the audit fields to validate
pub fn updated_at(record: &Record) -> Value {
    let field = |name: &str| record.get(name).and_then(Value::as_str).unwrap_or_default();

    match field("deletedAt") {
        "" => Value::String(field("createdAt").to_string()),
        deleted_at => Value::String(deleted_at.to_string()),
    }
}

pub fn is_deleted(record: &Record) -> bool {
    record
        .get("deletedAt")
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

/// Live records first, then most recently updated first
pub fn display_order(a: &Record, b: &Record) -> Ordering {
    is_deleted(a)
        .cmp(&is_deleted(b))
        .then_with(|| parse_timestamp(&updated_at(b)).cmp(&parse_timestamp(&updated_at(a))))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<FixedOffset>> {
    value.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}
