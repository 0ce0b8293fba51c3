use api_key_service::ApiKeyPolicy;
use datastore::InMemoryRepository;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let addr =
        std::env::var("MOCK_SERVER_ADDR").unwrap_or_else(|_| server::DEFAULT_ADDR.to_string());
    let keys = ApiKeyPolicy::from_configured(std::env::var("MOCK_API_KEY").ok());
    if matches!(keys, ApiKeyPolicy::AnyNonEmpty) {
        info!("MOCK_API_KEY not set, accepting any non-empty key");
    }

    let app = server::app(Arc::new(InMemoryRepository::new()), keys);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "Mock server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Mock server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
