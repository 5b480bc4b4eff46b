use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use trello_poller::api::{create_router, ApiState};
use trello_poller::{ExecutionSink, HttpDispatcher, LogDispatcher, PollerConfig, PollerManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trello_poller=info,trello=info".into()),
        )
        .init();

    info!("Trello poller starting...");

    let config_path = std::env::var("TRELLO_POLLER_CONFIG")
        .unwrap_or_else(|_| "trello-poller.toml".to_string());

    let mut config = PollerConfig::load(&config_path)
        .with_context(|| format!("Failed to load poller config from {}", config_path))?;

    if let Ok(url) = std::env::var("TRELLO_DISPATCH_URL") {
        config.dispatch_url = Some(url);
    }

    info!(
        config_path = %config_path,
        trigger_count = config.triggers.len(),
        dispatch_url = config.dispatch_url.as_deref().unwrap_or("<log only>"),
        api_port = config.api_port,
        "Configuration loaded"
    );

    let sink: Arc<dyn ExecutionSink> = match &config.dispatch_url {
        Some(url) => Arc::new(HttpDispatcher::new(url.clone())),
        None => Arc::new(LogDispatcher),
    };

    let mut manager = PollerManager::new(sink);
    manager.start(config.triggers).await;

    // Start HTTP API server
    let router = create_router(ApiState {
        status_map: manager.status_map(),
    });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.api_port))
        .await
        .context("Failed to bind status API port")?;
    info!(port = config.api_port, "Status API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Status API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    manager.shutdown().await;
    info!("Trello poller stopped");

    Ok(())
}
