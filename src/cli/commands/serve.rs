use anyhow::Context;
use std::sync::Arc;

use crate::app::{app, AppState};
use crate::config::{config, DataApiMode};
use crate::data::{DataApi, HttpDataApi, MemoryDataApi};
use crate::identity::{HostedIdentityProvider, IdentityProvider};
use crate::models::ModelRegistry;
use crate::views::DisplayZone;

pub async fn handle(port: Option<u16>, bind: Option<String>) -> anyhow::Result<()> {
    let config = config();
    tracing::info!("Starting staff dashboard in {:?} mode", config.environment);

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(HostedIdentityProvider::new(&config.identity).context("building identity client")?);

    let data: Arc<dyn DataApi> = match config.data_api.mode {
        DataApiMode::Http => {
            tracing::info!("Records served by {}", config.data_api.base_url);
            Arc::new(HttpDataApi::new(&config.data_api).context("building data API client")?)
        }
        DataApiMode::Memory => {
            tracing::warn!("Records held in memory; they are lost on exit");
            Arc::new(MemoryDataApi::new())
        }
    };

    let registry = Arc::new(ModelRegistry::builtin());
    tracing::info!("{} model type(s) registered", registry.len());

    let state = AppState::new(registry, identity, data, DisplayZone::from_config(&config.display));
    let router = app(state, &config.security);

    let bind_addr = format!(
        "{}:{}",
        bind.as_deref().unwrap_or(&config.server.bind_addr),
        port.unwrap_or(config.server.port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Staff dashboard listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server")?;

    Ok(())
}
