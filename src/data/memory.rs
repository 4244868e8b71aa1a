use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{DataApi, DataError};
use crate::identity::AuthSession;
use crate::models::{ModelDefinition, Record, RecordKey};

type Slot = (&'static str, RecordKey);

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Records held in process memory, for local development and tests
#[derive(Default)]
pub struct MemoryDataApi {
    records: RwLock<BTreeMap<Slot, Record>>,
}

impl MemoryDataApi {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataApi for MemoryDataApi {
    async fn list(&self, _session: &AuthSession, definition: &ModelDefinition) -> Result<Vec<Record>, DataError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|((entity, _), _)| *entity == definition.keys.entity_type)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get(
        &self,
        _session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<Record, DataError> {
        self.records
            .read()
            .await
            .get(&(definition.keys.entity_type, key.clone()))
            .cloned()
            .ok_or_else(|| DataError::NotFound(key.sort_id.clone()))
    }

    async fn put(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
        mut record: Record,
    ) -> Result<(), DataError> {
        definition.stamp_key(&mut record, key);
        record.insert("createdAt".into(), Value::String(now()));
        record.insert("createdBy".into(), Value::String(session.subject.clone()));
        record.insert("deletedAt".into(), Value::String(String::new()));
        record.insert("deletedBy".into(), Value::String(String::new()));

        self.records
            .write()
            .await
            .insert((definition.keys.entity_type, key.clone()), record);
        Ok(())
    }

    async fn delete(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<(), DataError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&(definition.keys.entity_type, key.clone()))
            .ok_or_else(|| DataError::NotFound(key.sort_id.clone()))?;

        let already_deleted = record
            .get("deletedAt")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if already_deleted {
            return Err(DataError::Conflict(format!("{} is already deleted", key.sort_id)));
        }

        record.insert("deletedAt".into(), Value::String(now()));
        record.insert("deletedBy".into(), Value::String(session.subject.clone()));
        Ok(())
    }
}
