pub mod hosted;
pub mod tokens;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use hosted::HostedIdentityProvider;
pub use tokens::{AuthTokens, TokenClaims, TokenStorage};

/// Errors reported by the identity service.
///
/// The navigation guard collapses every variant into "not signed in".
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("No active session")]
    NoSession,
    #[error("Session expired")]
    Expired,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("No sign-in challenge pending for {0}")]
    ChallengeMissing(String),
    #[error("Identity service rejected the request: {0}")]
    Rejected(String),
    #[error("Identity service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected identity service response: {0}")]
    Unexpected(String),
}

/// The signed-in session as reported by the identity service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub subject: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub tokens: AuthTokens,
}

/// User attribute record, passed through as the service returns it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAttributes(pub BTreeMap<String, String>);

impl UserAttributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UserAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The hosted identity service, seen from the dashboard
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, failing when nobody is signed in or the session lapsed
    async fn fetch_session(&self) -> Result<AuthSession, IdentityError>;

    /// Attributes of the signed-in user
    async fn fetch_user_attributes(&self) -> Result<UserAttributes, IdentityError>;

    /// Start an email one-time-code sign-in
    async fn sign_in(&self, email: &str) -> Result<(), IdentityError>;

    /// Complete a pending sign-in with the code sent to `email`
    async fn confirm_sign_in(&self, email: &str, code: &str) -> Result<(), IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}
