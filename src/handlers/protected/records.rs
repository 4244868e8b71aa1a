use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::guard::routes;
use crate::middleware::{ApiResponse, ApiResult, CurrentSession};
use crate::models::{Record, RecordKey};

use super::model::definition;

#[derive(Debug, Serialize)]
pub struct StoredRecord {
    pub key: RecordKey,
    pub record: Record,
}

/// POST /api/models/:model_type - validate against the model's schema, then upsert
///
/// Fields outside the schema are dropped. Defaults fill absent fields, so a
/// create without an id gets a fresh one.
pub async fn put(
    State(state): State<AppState>,
    Path(model_type): Path<String>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<Value>,
) -> ApiResult<StoredRecord> {
    let definition = definition(&state, &model_type)?;
    let record = definition.schema.validate(&payload)?;

    let key = definition
        .record_key(&record)
        .ok_or_else(|| ApiError::bad_request("Record is missing its identifying fields"))?;

    state.data.put(&session, definition, &key, record).await?;
    let stored = state.data.get(&session, definition, &key).await?;
    tracing::info!(
        "{} saved {} {}/{}",
        session.subject,
        definition.key,
        key.partition_id,
        key.sort_id
    );

    let location = routes::record_api_href(definition.key, &key);
    Ok(ApiResponse::created(StoredRecord { key, record: stored }, location))
}

/// GET /api/models/:model_type/:partition_id/:record_id
pub async fn get(
    State(state): State<AppState>,
    Path((model_type, partition_id, record_id)): Path<(String, String, String)>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Record> {
    let definition = definition(&state, &model_type)?;
    let key = RecordKey::new(partition_id, record_id);
    let record = state.data.get(&session, definition, &key).await?;

    Ok(ApiResponse::success(record))
}

/// DELETE /api/models/:model_type/:partition_id/:record_id - soft delete
///
/// Returns the record as it now stands, `deletedAt` and `deletedBy` set.
pub async fn delete(
    State(state): State<AppState>,
    Path((model_type, partition_id, record_id)): Path<(String, String, String)>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Record> {
    let definition = definition(&state, &model_type)?;
    let key = RecordKey::new(partition_id, record_id);

    state.data.delete(&session, definition, &key).await?;
    let record = state.data.get(&session, definition, &key).await?;
    tracing::info!(
        "{} deleted {} {}/{}",
        session.subject,
        definition.key,
        key.partition_id,
        key.sort_id
    );

    Ok(ApiResponse::success(record))
}
