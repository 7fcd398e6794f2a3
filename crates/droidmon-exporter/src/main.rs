use anyhow::Result;
use droidmon_collector::platform::SysfsPlatform;
use droidmon_collector::registry::ProviderRegistry;
use droidmon_exporter::app;
use droidmon_exporter::config::ExporterConfig;
use droidmon_exporter::state::AppState;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("droidmon=info".parse()?))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExporterConfig::load(&path)?,
        None => ExporterConfig::default(),
    };

    // Hosts without a /data partition fall back to the root filesystem.
    let storage_path = if Path::new(&config.storage_path).exists() {
        config.storage_path.clone()
    } else {
        tracing::warn!(path = %config.storage_path, "Storage path not found, sampling / instead");
        "/".to_string()
    };

    let platform = Arc::new(SysfsPlatform::new());
    let registry = Arc::new(ProviderRegistry::with_defaults(platform, &storage_path));
    tracing::info!(providers = registry.len(), "droidmon-exporter starting");

    let app = app::build_http_app(AppState { registry });

    // A failed bind is fatal: surface it to the operator instead of retrying.
    let addr: SocketAddr = config.listen_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(listen = %addr, "Serving metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    tracing::info!("Exporter stopped");
    Ok(())
}
