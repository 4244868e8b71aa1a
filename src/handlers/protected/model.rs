use axum::extract::{Path, State};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentSession};
use crate::models::{ModelDefinition, RecordKey};
use crate::views::{ModelDetailView, ModelListView, ModelView};

/// Resolve a model key against the registry.
///
/// The guard refuses navigations to unregistered keys, but the record API
/// is not guarded and reaches this too.
pub(crate) fn definition<'a>(state: &'a AppState, model_type: &str) -> Result<&'a ModelDefinition, ApiError> {
    state
        .registry
        .lookup(model_type)
        .ok_or_else(|| ApiError::not_found(format!("Unknown model type '{}'", model_type)))
}

/// GET /:model_type and /model/:model_type - table of every record of the type
pub async fn list(
    State(state): State<AppState>,
    Path(model_type): Path<String>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<ModelListView> {
    let definition = definition(&state, &model_type)?;
    let records = state.data.list(&session, definition).await?;
    tracing::debug!("Listing {} {} record(s)", records.len(), definition.key);

    Ok(ApiResponse::success(ModelView::new(definition, state.zone).list(records)))
}

/// GET /model/:model_type/:partition_id/:record_id - one record
pub async fn detail(
    State(state): State<AppState>,
    Path((model_type, partition_id, record_id)): Path<(String, String, String)>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<ModelDetailView> {
    let definition = definition(&state, &model_type)?;
    let key = RecordKey::new(partition_id, record_id);
    let record = state.data.get(&session, definition, &key).await?;

    Ok(ApiResponse::success(ModelView::new(definition, state.zone).detail(&record)))
}
