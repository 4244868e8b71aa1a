#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use tokio::task::JoinHandle;

use staff_dashboard::config::SecurityConfig;
use staff_dashboard::data::MemoryDataApi;
use staff_dashboard::identity::{AuthSession, AuthTokens, IdentityError, IdentityProvider, UserAttributes};
use staff_dashboard::models::ModelRegistry;
use staff_dashboard::views::DisplayZone;
use staff_dashboard::{app, AppState};

pub const EMAIL: &str = "ada@example.com";
pub const CODE: &str = "424242";
pub const SUBJECT: &str = "staff-1";

/// Identity service double: one pending challenge, one fixed code
#[derive(Default)]
pub struct FakeIdentity {
    signed_in: AtomicBool,
    attributes_fail: AtomicBool,
    pending: Mutex<Option<String>>,
    pub session_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn signed_in() -> Arc<Self> {
        let identity = Arc::new(Self::default());
        identity.set_signed_in(true);
        identity
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_signed_in(&self, value: bool) {
        self.signed_in.store(value, Ordering::SeqCst);
    }

    pub fn fail_attributes(&self) {
        self.attributes_fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn fetch_session(&self) -> Result<AuthSession, IdentityError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        if !self.signed_in.load(Ordering::SeqCst) {
            return Err(IdentityError::NoSession);
        }
        Ok(AuthSession {
            subject: SUBJECT.to_string(),
            email: Some(EMAIL.to_string()),
            expires_at: Utc::now() + Duration::hours(1),
            tokens: AuthTokens { id_token: "id-token".into(), access_token: "access-token".into() },
        })
    }

    async fn fetch_user_attributes(&self) -> Result<UserAttributes, IdentityError> {
        if self.attributes_fail.load(Ordering::SeqCst) {
            return Err(IdentityError::Rejected("attributes unavailable".into()));
        }
        Ok([("email", EMAIL), ("given_name", "Ada")].into_iter().collect())
    }

    async fn sign_in(&self, email: &str) -> Result<(), IdentityError> {
        *self.pending.lock().unwrap() = Some(email.to_string());
        Ok(())
    }

    async fn confirm_sign_in(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let mut pending = self.pending.lock().unwrap();
        if pending.as_deref() != Some(email) {
            return Err(IdentityError::ChallengeMissing(email.to_string()));
        }
        if code != CODE {
            return Err(IdentityError::Rejected("Incorrect code".into()));
        }
        *pending = None;
        self.set_signed_in(true);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.set_signed_in(false);
        Ok(())
    }
}

pub fn state(identity: Arc<FakeIdentity>) -> AppState {
    AppState::new(
        Arc::new(ModelRegistry::builtin()),
        identity,
        Arc::new(MemoryDataApi::new()),
        DisplayZone::Fixed(chrono::FixedOffset::east_opt(0).unwrap()),
    )
}

pub fn router(state: AppState) -> Router {
    let security = SecurityConfig { enable_cors: false, cors_origins: Vec::new() };
    app(state, &security)
}

/// The dashboard served in-process on an ephemeral port
pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    pub identity: Arc<FakeIdentity>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(identity: Arc<FakeIdentity>) -> Result<Self> {
        let state = state(identity.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let router = router(state.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { base_url, state, identity, handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client that reports redirects instead of following them
pub fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .context("failed to build client")
}

pub fn location(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
