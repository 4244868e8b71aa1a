pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::identity::AuthSession;
use crate::models::{ModelDefinition, Record, RecordKey};

pub use http::HttpDataApi;
pub use memory::MemoryDataApi;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Data API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Data API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Could not decode data API response: {0}")]
    Decode(String),
}

/// CRUD over the record types in the registry.
///
/// Deletion is soft: the record keeps its fields and gains `deletedAt` /
/// `deletedBy`.
#[async_trait]
pub trait DataApi: Send + Sync {
    async fn list(&self, session: &AuthSession, definition: &ModelDefinition) -> Result<Vec<Record>, DataError>;

    async fn get(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<Record, DataError>;

    /// Create or replace the record at `key`
    async fn put(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
        record: Record,
    ) -> Result<(), DataError>;

    async fn delete(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<(), DataError>;
}
