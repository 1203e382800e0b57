use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use lingua_api::{app, AppState, Clock};
use lingua_store::app_config::Config;
use lingua_store::{InMemoryCatalog, InMemoryOrderRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingua_api=debug,lingua_order=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Lingua API on port {}", config.server.port);

    let catalog = InMemoryCatalog::load(&config.catalog.seed_path)
        .await
        .context("Failed to load catalog")?;

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(InMemoryOrderRepository::new()),
        config.business_rules.order_limits(),
        Clock::System,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
