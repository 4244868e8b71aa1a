use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::guard::routes;
use crate::middleware::{ApiResponse, ApiResult};
use crate::views::{ConfirmSignInForm, FormPage};

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub email: String,
}

/// GET /confirm-sign-in-with-email-code?email=...
pub async fn page(Query(query): Query<ConfirmQuery>) -> ApiResult<FormPage> {
    Ok(ApiResponse::success(FormPage::confirm_sign_in(query.email)))
}

/// POST /confirm-sign-in-with-email-code - complete the challenge
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ConfirmSignInForm>,
) -> Result<Redirect, ApiError> {
    let email = form.email.trim();
    let code = form.code.trim();
    if email.is_empty() || code.is_empty() {
        return Err(ApiError::bad_request("Email and code are required"));
    }

    state.identity.confirm_sign_in(email, code).await.map_err(|e| {
        tracing::warn!("Sign-in confirmation for {} failed: {}", email, e);
        ApiError::from(e)
    })?;
    tracing::info!("{} signed in", email);

    Ok(Redirect::to(routes::LANDING))
}
