//! API server binary.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use demark_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env();
    let addr = format!("{}:{}", config.host, config.port);

    info!(
        host = %config.host,
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        processed_dir = %config.processed_dir.display(),
        max_concurrent_jobs = config.max_concurrent_jobs,
        "Starting server"
    );

    let state = AppState::new(config).context("failed to create storage directories")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("demark=info,tower_http=info"));

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
        // Fall through and shut down rather than run without a handler.
    }
    info!("Shutdown signal received");
}
