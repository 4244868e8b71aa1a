use serde_json::Value;
use uuid::Uuid;

use super::column::ColumnDef;
use super::core::Record;
use super::definition::{IdentifyingKeys, ModelDefinition};
use super::schema::{FieldDefault, FieldRule, ValidationSchema};

pub const KEY: &str = "person-metadata";

pub fn definition() -> ModelDefinition {
    ModelDefinition {
        key: KEY,
        icon: "user-round",
        schema: ValidationSchema::new(vec![
            FieldRule::required_text("givenName"),
            FieldRule::required_text("familyName"),
            FieldRule::uuid("personId").with_default(FieldDefault::GeneratedUuid),
        ]),
        columns: vec![
            ColumnDef::select(),
            ColumnDef::field("givenName"),
            ColumnDef::field("familyName"),
            ColumnDef::updated_at(),
        ],
        defaults,
        keys: IdentifyingKeys {
            entity_type: "PersonMetadata",
            partition_type: "Person",
            partition_key: Some("personId"),
            sort_key: "personId",
        },
    }
}

fn defaults() -> Record {
    let mut record = Record::new();
    record.insert("givenName".into(), Value::String(String::new()));
    record.insert("familyName".into(), Value::String(String::new()));
    record.insert("personId".into(), Value::String(Uuid::now_v7().to_string()));
    record
}
