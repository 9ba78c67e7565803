//! DocShare Server
//!
//! A self-hosted document-sharing server that embeds documents through
//! online viewers, with bookmarks, saved folders and sharing.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docshare_server::config::Config;
use docshare_server::routes;
use docshare_server::service::{sample::sample_documents, InMemoryDocumentService};
use docshare_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshare_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting DocShare Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("PDF bridge: {}", config.viewer.pdf_bridge_url);
    tracing::info!("Office viewer: {}", config.viewer.office_viewer_url);

    let service = if config.library.seed_sample_data {
        let documents = sample_documents();
        tracing::info!("Library seeded with {} sample documents", documents.len());
        InMemoryDocumentService::with_documents(documents)
    } else {
        InMemoryDocumentService::new()
    };

    let app_state = AppState::new(config.clone(), Arc::new(service));
    let app = routes::app(app_state);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid SERVER_HOST: {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!(
        "DocShare Server listening on {} ({})",
        addr,
        config.server.public_base_url
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
