use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::tokens::{session_from_tokens, AuthTokens, TokenStorage};
use super::{AuthSession, IdentityError, IdentityProvider, UserAttributes};
use crate::config::IdentityConfig;

/// How long an unanswered email code stays usable
const CHALLENGE_TTL: Duration = Duration::from_secs(180);

/// Pending email-code challenge for one address
struct Challenge {
    session: String,
    issued_at: Instant,
}

impl Challenge {
    fn is_live(&self, now: Instant) -> bool {
        now.duration_since(self.issued_at) < CHALLENGE_TTL
    }
}

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    session: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

/// Identity provider backed by the hosted identity service over HTTPS.
///
/// Tokens from a confirmed sign-in live in [`TokenStorage`]; every
/// `fetch_session` re-verifies the ID token so an expired session fails.
pub struct HostedIdentityProvider {
    client: Client,
    base_url: String,
    token_secret: String,
    storage: TokenStorage,
    challenges: Mutex<HashMap<String, Challenge>>,
}

impl HostedIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_secret: config.token_secret.clone(),
            storage: TokenStorage::new(),
            challenges: Mutex::new(HashMap::new()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn challenges(&self) -> MutexGuard<'_, HashMap<String, Challenge>> {
        self.challenges.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the challenge for `email`, replacing any earlier one and
    /// dropping those that have lapsed.
    fn remember_challenge(&self, email: &str, session: String, now: Instant) {
        let mut challenges = self.challenges();
        challenges.retain(|_, challenge| challenge.is_live(now));
        challenges.insert(email.to_string(), Challenge { session, issued_at: now });
    }

    /// A challenge answers one confirmation attempt, right or wrong
    fn take_challenge(&self, email: &str, now: Instant) -> Option<String> {
        self.challenges()
            .remove(email)
            .filter(|challenge| challenge.is_live(now))
            .map(|challenge| challenge.session)
    }

    fn tokens(&self) -> Result<AuthTokens, IdentityError> {
        self.storage.load().ok_or(IdentityError::NoSession)
    }

    async fn rejected(response: Response) -> IdentityError {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status.to_string(),
        };
        if status == StatusCode::UNAUTHORIZED {
            IdentityError::NoSession
        } else {
            IdentityError::Rejected(message)
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    async fn fetch_session(&self) -> Result<AuthSession, IdentityError> {
        let tokens = self.tokens()?;
        session_from_tokens(tokens, &self.token_secret)
    }

    async fn fetch_user_attributes(&self) -> Result<UserAttributes, IdentityError> {
        let tokens = self.tokens()?;

        let response = self
            .client
            .get(self.url("/user-attributes"))
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: Value = response.json().await?;
        let Value::Object(map) = body else {
            return Err(IdentityError::Unexpected("attributes must be an object".to_string()));
        };

        Ok(map
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(s) => (name, s),
                other => (name, other.to_string()),
            })
            .collect())
    }

    async fn sign_in(&self, email: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .post(self.url("/sign-in"))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let challenge: ChallengeResponse = response.json().await?;
        self.remember_challenge(email, challenge.session, Instant::now());

        tracing::info!("Email code sign-in started for {}", email);
        Ok(())
    }

    async fn confirm_sign_in(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let session = self
            .take_challenge(email, Instant::now())
            .ok_or_else(|| IdentityError::ChallengeMissing(email.to_string()))?;

        let response = self
            .client
            .post(self.url("/sign-in/confirm"))
            .json(&json!({ "email": email, "code": code, "session": session }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let tokens: AuthTokens = response.json().await?;
        // Refuse tokens we could not verify later
        session_from_tokens(tokens.clone(), &self.token_secret)?;
        self.storage.store(tokens);

        tracing::info!("Sign-in confirmed for {}", email);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let Some(tokens) = self.storage.load() else {
            return Ok(());
        };
        self.storage.clear();

        let response = self
            .client
            .post(self.url("/sign-out"))
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Identity service sign-out returned {}", response.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IdentityConfig {
        IdentityConfig {
            base_url: "http://127.0.0.1:9/".into(),
            token_secret: "secret".into(),
            request_timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_no_tokens_means_no_session() {
        let provider = HostedIdentityProvider::new(&config()).unwrap();
        assert!(matches!(provider.fetch_session().await, Err(IdentityError::NoSession)));
        assert!(matches!(provider.fetch_user_attributes().await, Err(IdentityError::NoSession)));
    }

    #[tokio::test]
    async fn test_confirm_without_challenge() {
        let provider = HostedIdentityProvider::new(&config()).unwrap();
        let err = provider.confirm_sign_in("ada@example.com", "123456").await.unwrap_err();
        assert!(matches!(err, IdentityError::ChallengeMissing(_)));
    }

    #[tokio::test]
    async fn test_lapsed_challenge_is_missing_and_pruned() {
        let provider = HostedIdentityProvider::new(&config()).unwrap();
        let now = Instant::now();
        let Some(issued) = now.checked_sub(CHALLENGE_TTL + Duration::from_secs(1)) else {
            return;
        };

        provider.remember_challenge("old@example.com", "s-old".into(), issued);
        provider.remember_challenge("ada@example.com", "s-ada".into(), issued);
        assert_eq!(provider.take_challenge("ada@example.com", now), None);
        assert!(!provider.challenges().contains_key("ada@example.com"));

        // a new sign-in sweeps out what lapsed
        provider.remember_challenge("grace@example.com", "s-grace".into(), now);
        assert!(!provider.challenges().contains_key("old@example.com"));
        assert_eq!(provider.challenges().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_confirm_drops_the_challenge() {
        let provider = HostedIdentityProvider::new(&config()).unwrap();
        provider.remember_challenge("ada@example.com", "s-1".into(), Instant::now());
        provider.remember_challenge("ada@example.com", "s-2".into(), Instant::now());
        assert_eq!(provider.challenges().len(), 1);

        // nothing listens on the discard port, so the confirm call fails
        let err = provider.confirm_sign_in("ada@example.com", "123456").await.unwrap_err();
        assert!(matches!(err, IdentityError::Transport(_)));
        assert!(provider.challenges().is_empty());

        let err = provider.confirm_sign_in("ada@example.com", "123456").await.unwrap_err();
        assert!(matches!(err, IdentityError::ChallengeMissing(_)));
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let provider = HostedIdentityProvider::new(&config()).unwrap();
        provider.sign_out().await.unwrap();
        assert_eq!(provider.url("/sign-in"), "http://127.0.0.1:9/sign-in");
    }
}
