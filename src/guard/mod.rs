pub mod location;
pub mod routes;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::identity::IdentityProvider;
use crate::models::ModelRegistry;
use crate::stores::{AttributesStore, SessionStore, StateStore};

pub use location::Location;
pub use routes::Route;

/// Outcome of guarding one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
    /// Stay on the current page
    Refuse,
}

/// Last location the guard let through; only the guard writes it
pub type NavigationHistory = StateStore<Location>;

/// Runs before every navigation: refreshes the session and user attributes,
/// then decides whether the navigation proceeds.
pub struct NavigationGuard {
    identity: Arc<dyn IdentityProvider>,
    registry: Arc<ModelRegistry>,
    sessions: SessionStore,
    attributes: AttributesStore,
    history: NavigationHistory,
    in_flight: Mutex<()>,
}

impl NavigationGuard {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        registry: Arc<ModelRegistry>,
        sessions: SessionStore,
        attributes: AttributesStore,
    ) -> Self {
        Self {
            identity,
            registry,
            sessions,
            attributes,
            history: NavigationHistory::new(),
            in_flight: Mutex::new(()),
        }
    }

    /// Where the user currently is; `/` before the first allowed navigation
    pub fn current(&self) -> Location {
        self.history.get().unwrap_or_else(|| Location::new(routes::ROOT))
    }

    /// Guard one navigation end to end. Navigations are handled one at a time.
    pub async fn navigate(&self, to: &Location) -> GuardDecision {
        let _in_flight = self.in_flight.lock().await;
        let from = self.current();

        let decision = match self.before_each(to).await {
            GuardDecision::Allow => self.before_enter(to, &from),
            other => other,
        };

        match &decision {
            GuardDecision::Allow => {
                tracing::debug!("Navigation {} -> {} allowed", from.path, to.path);
                self.history.set(Some(to.clone()));
            }
            GuardDecision::Redirect(target) => {
                tracing::debug!("Navigation {} -> {} redirected to {}", from.path, to.path, target);
            }
            GuardDecision::Refuse => {
                tracing::info!("Navigation {} -> {} refused", from.path, to.path);
            }
        }

        decision
    }

    /// Session refresh and the signed-in / signed-out redirects
    pub async fn before_each(&self, to: &Location) -> GuardDecision {
        let authenticated = self.refresh().await;
        let public = routes::is_public(&to.path);

        match (authenticated, public || to.path == routes::ROOT) {
            (true, true) => GuardDecision::Redirect(routes::LANDING.to_string()),
            (true, false) => GuardDecision::Allow,
            (false, _) if public => GuardDecision::Allow,
            (false, _) => GuardDecision::Redirect(routes::SIGN_IN.to_string()),
        }
    }

    /// Per-route admission checks, run once `before_each` allowed the navigation
    pub fn before_enter(&self, to: &Location, from: &Location) -> GuardDecision {
        match Route::resolve(&to.path) {
            Route::Model { key, .. } if !self.registry.contains(&key) => {
                tracing::warn!("Unknown model type '{}'", key);
                GuardDecision::Refuse
            }
            Route::ConfirmSignIn if from.path != routes::SIGN_IN || to.param("email").is_none() => {
                GuardDecision::Refuse
            }
            _ => GuardDecision::Allow,
        }
    }

    /// Fetch the session, then the attributes. Any failure clears both stores.
    async fn refresh(&self) -> bool {
        let session = match self.identity.fetch_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!("No session: {}", e);
                self.clear();
                return false;
            }
        };
        self.sessions.set(Some(session));

        match self.identity.fetch_user_attributes().await {
            Ok(attributes) => {
                self.attributes.set(Some(attributes));
                true
            }
            Err(e) => {
                tracing::warn!("Fetching user attributes failed: {}", e);
                self.clear();
                false
            }
        }
    }

    fn clear(&self) {
        self.sessions.set(None);
        self.attributes.set(None);
    }
}
