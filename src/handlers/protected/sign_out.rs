use axum::{extract::State, response::Redirect};

use crate::app::AppState;
use crate::error::ApiError;
use crate::guard::routes;

/// POST /sign-out
///
/// The stores are left alone; the next navigation finds no session and
/// empties them.
pub async fn post(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    state.identity.sign_out().await?;
    tracing::info!("Signed out");
    Ok(Redirect::to(routes::SIGN_IN))
}
