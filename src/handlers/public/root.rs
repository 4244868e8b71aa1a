use axum::{http::Uri, response::Redirect};

use crate::error::ApiError;
use crate::guard::routes;

/// GET / - the guard redirects every navigation here before it arrives;
/// answer the same way if it ever does.
pub async fn get() -> Redirect {
    Redirect::to(routes::LANDING)
}

/// Fallback for every path no page matches, reached once the guard let the
/// navigation through.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No page at {}", uri.path()))
}
