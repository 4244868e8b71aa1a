use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
use crate::identity::AuthSession;

/// The session the last navigation fetched.
///
/// Record API handlers read it from the session store; they never refresh
/// it themselves.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub AuthSession);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state
            .sessions
            .get()
            .map(CurrentSession)
            .ok_or_else(|| ApiError::unauthorized("Sign in required"))
    }
}
