use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::data::DataApi;
use crate::guard::NavigationGuard;
use crate::handlers::{protected, public};
use crate::identity::IdentityProvider;
use crate::middleware::navigation_guard_middleware;
use crate::models::ModelRegistry;
use crate::stores::{AttributesStore, SessionStore};
use crate::views::DisplayZone;

/// Everything a handler can reach. Cloned per request; all members are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub sessions: SessionStore,
    pub attributes: AttributesStore,
    pub identity: Arc<dyn IdentityProvider>,
    pub data: Arc<dyn DataApi>,
    pub guard: Arc<NavigationGuard>,
    pub zone: DisplayZone,
}

impl AppState {
    pub fn new(
        registry: Arc<ModelRegistry>,
        identity: Arc<dyn IdentityProvider>,
        data: Arc<dyn DataApi>,
        zone: DisplayZone,
    ) -> Self {
        let sessions = SessionStore::new();
        let attributes = AttributesStore::new();
        let guard = Arc::new(NavigationGuard::new(
            identity.clone(),
            registry.clone(),
            sessions.clone(),
            attributes.clone(),
        ));

        Self { registry, sessions, attributes, identity, data, guard, zone }
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        // Guarded pages
        .merge(page_routes(state.clone()))
        // Not navigations
        .route("/sign-out", post(protected::sign_out))
        .merge(record_routes());

    if security.enable_cors {
        router = router.layer(cors_layer(&security.cors_origins));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn page_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/sign-in", get(public::sign_in_page).post(public::sign_in_submit))
        .route(
            "/confirm-sign-in-with-email-code",
            get(public::confirm_page).post(public::confirm_submit),
        )
        .route("/dashboard", get(protected::dashboard))
        .route("/:model_type", get(protected::model_list))
        .route("/model/:model_type", get(protected::model_list))
        .route("/model/:model_type/:partition_id/:record_id", get(protected::model_detail))
        // Unmatched locations are still navigations
        .fallback(public::not_found)
        .layer(from_fn_with_state(state, navigation_guard_middleware))
}

fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/api/models/:model_type", post(protected::record_put))
        .route(
            "/api/models/:model_type/:partition_id/:record_id",
            get(protected::record_get).delete(protected::record_delete),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}
