use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::guard::{GuardDecision, Location};

/// Guard every page navigation.
///
/// Only `GET` and `HEAD` requests are navigations; form posts on page
/// routes pass straight through. A refused navigation answers
/// `204 No Content` so the browser stays where it is.
pub async fn navigation_guard_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let to = Location::from_uri(request.uri());

    match state.guard.navigate(&to).await {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(target) => Redirect::to(&target).into_response(),
        GuardDecision::Refuse => StatusCode::NO_CONTENT.into_response(),
    }
}
