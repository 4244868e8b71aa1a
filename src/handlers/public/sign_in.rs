use axum::{extract::State, response::Redirect, Json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::guard::{routes, Location};
use crate::middleware::{ApiResponse, ApiResult};
use crate::views::{FormPage, SignInForm};

/// GET /sign-in
pub async fn page() -> ApiResult<FormPage> {
    Ok(ApiResponse::success(FormPage::sign_in()))
}

/// POST /sign-in - start an email one-time-code challenge
///
/// On success the browser is sent to the confirmation page with the email
/// carried in the query, which is what admits it there.
pub async fn submit(State(state): State<AppState>, Json(form): Json<SignInForm>) -> Result<Redirect, ApiError> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }

    state.identity.sign_in(email).await?;
    tracing::info!("Sign-in code sent to {}", email);

    let next = Location::new(routes::CONFIRM_SIGN_IN).with_query("email", email);
    Ok(Redirect::to(&next.href()))
}
