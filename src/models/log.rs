use serde_json::{json, Value};
use uuid::Uuid;

use super::column::ColumnDef;
use super::core::Record;
use super::definition::{IdentifyingKeys, ModelDefinition};
use super::schema::{FieldDefault, FieldRule, ValidationSchema};

pub const KEY: &str = "log";

/// Hours logged by a person against a job
pub fn definition() -> ModelDefinition {
    ModelDefinition {
        key: KEY,
        icon: "clipboard-list",
        schema: ValidationSchema::new(vec![
            FieldRule::uuid("personId"),
            FieldRule::number("hours", Some(0.0)),
            FieldRule::uuid("jobId"),
            FieldRule::uuid("logId").with_default(FieldDefault::GeneratedUuid),
        ]),
        columns: vec![
            ColumnDef::select(),
            ColumnDef::field("personId"),
            ColumnDef::field("hours"),
            ColumnDef::field("jobId"),
            ColumnDef::updated_at(),
        ],
        defaults,
        keys: IdentifyingKeys {
            entity_type: "Log",
            partition_type: "Job",
            partition_key: Some("jobId"),
            sort_key: "logId",
        },
    }
}

fn defaults() -> Record {
    let mut record = Record::new();
    record.insert("personId".into(), Value::String(String::new()));
    record.insert("hours".into(), json!(0));
    record.insert("jobId".into(), Value::String(String::new()));
    record.insert("logId".into(), Value::String(Uuid::now_v7().to_string()));
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_scoped_to_job() {
        let def = definition();
        assert!(!def.keys.keyed_by_partition());

        let mut record = def.new_record();
        // no job yet
        assert!(def.record_key(&record).is_none());

        let job_id = Uuid::now_v7().to_string();
        record.insert("jobId".into(), json!(job_id));
        let key = def.record_key(&record).unwrap();
        assert_eq!(key.partition_id, job_id);
        assert_eq!(Some(key.sort_id.as_str()), record["logId"].as_str());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let def = definition();
        let errors = def
            .schema
            .validate(&json!({
                "personId": Uuid::now_v7().to_string(),
                "jobId": Uuid::now_v7().to_string(),
                "hours": -2
            }))
            .unwrap_err();
        assert!(errors.contains("hours"));
        assert!(!errors.contains("logId"));
    }
}
