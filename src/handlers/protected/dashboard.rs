use axum::extract::State;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, CurrentSession};
use crate::views::DashboardView;

/// GET /dashboard - signed-in user plus one entry per model type
pub async fn get(State(state): State<AppState>, CurrentSession(_session): CurrentSession) -> ApiResult<DashboardView> {
    let user = state.attributes.get().unwrap_or_default();
    Ok(ApiResponse::success(DashboardView::new(user, &state.registry)))
}
