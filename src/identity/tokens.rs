use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use super::{AuthSession, IdentityError};

/// Tokens issued by the identity service after a confirmed sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
}

/// Claims carried by the ID token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Verify an ID token and turn it into a session
pub fn session_from_tokens(tokens: AuthTokens, secret: &str) -> Result<AuthSession, IdentityError> {
    if secret.is_empty() {
        return Err(IdentityError::InvalidToken("token secret not configured".to_string()));
    }

    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let data = decode::<TokenClaims>(&tokens.id_token, &key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::Expired,
            _ => IdentityError::InvalidToken(e.to_string()),
        }
    })?;

    let expires_at = DateTime::<Utc>::from_timestamp(data.claims.exp, 0)
        .ok_or_else(|| IdentityError::InvalidToken(format!("bad exp {}", data.claims.exp)))?;

    Ok(AuthSession {
        subject: data.claims.sub,
        email: data.claims.email,
        expires_at,
        tokens,
    })
}

/// In-memory token slot owned by the identity provider
#[derive(Debug, Clone, Default)]
pub struct TokenStorage {
    tokens: Arc<RwLock<Option<AuthTokens>>>,
}

impl TokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> Option<AuthTokens> {
        match self.tokens.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn store(&self, tokens: AuthTokens) {
        self.set(Some(tokens));
    }

    pub fn clear(&self) {
        self.set(None);
    }

    fn set(&self, tokens: Option<AuthTokens>) {
        match self.tokens.write() {
            Ok(mut guard) => *guard = tokens,
            Err(poisoned) => *poisoned.into_inner() = tokens,
        }
    }
}
