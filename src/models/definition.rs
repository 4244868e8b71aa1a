use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::column::ColumnDef;
use super::core::Record;
use super::schema::ValidationSchema;

/// How records of one model type are addressed by the data service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifyingKeys {
    /// Entity name used by the data service, e.g. `PersonMetadata`
    pub entity_type: &'static str,
    /// Parent entity name, e.g. `Person`
    pub partition_type: &'static str,
    /// Field scoping the record to its parent
    pub partition_key: Option<&'static str>,
    /// Field identifying the record within its partition
    pub sort_key: &'static str,
}

impl IdentifyingKeys {
    /// Records whose sort id is their partition id are addressed by partition alone
    pub fn keyed_by_partition(&self) -> bool {
        self.partition_key == Some(self.sort_key)
    }
}

/// Address of a single record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub partition_id: String,
    pub sort_id: String,
}

impl RecordKey {
    pub fn new(partition_id: impl Into<String>, sort_id: impl Into<String>) -> Self {
        Self { partition_id: partition_id.into(), sort_id: sort_id.into() }
    }
}

/// Declarative description of one record type
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub key: &'static str,
    pub icon: &'static str,
    pub schema: ValidationSchema,
    pub columns: Vec<ColumnDef>,
    pub defaults: fn() -> Record,
    pub keys: IdentifyingKeys,
}

impl ModelDefinition {
    pub fn title(&self) -> String {
        self.key.to_case(Case::Title)
    }

    /// Fresh record for the create flow
    pub fn new_record(&self) -> Record {
        (self.defaults)()
    }

    /// Extract the record address from a record's identifying fields
    pub fn record_key(&self, record: &Record) -> Option<RecordKey> {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let sort_id = field(self.keys.sort_key)?;
        let partition_id = match self.keys.partition_key {
            Some(partition_key) => field(partition_key)?,
            None => sort_id.clone(),
        };

        Some(RecordKey { partition_id, sort_id })
    }

    /// Write the identifying fields for `key` into `record`
    pub fn stamp_key(&self, record: &mut Record, key: &RecordKey) {
        if let Some(partition_key) = self.keys.partition_key {
            record.insert(partition_key.to_string(), Value::String(key.partition_id.clone()));
        }
        record.insert(self.keys.sort_key.to_string(), Value::String(key.sort_id.clone()));
    }
}
