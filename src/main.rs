use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use smashing_service::{
    app,
    config::{AppConfig, StoreKind},
    state::AppState,
    storage::{FileStore, MemoryStore, SmashingStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = AppConfig::from_env()?;

    let store: Arc<dyn SmashingStore> = match &cfg.store {
        StoreKind::File(path) => {
            info!("Opening document store at {}", path.display());
            Arc::new(FileStore::open(path)?)
        }
        StoreKind::Memory => {
            info!("Using in-memory store, records will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let router = app(AppState::new(store.clone()), &cfg.public_dir);

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", cfg.bind_addr))?;

    info!("Smashing service running on http://{}", cfg.bind_addr);
    info!("   GET  /api/smashings - List smashings (lengthGt, lengthLt, sentimentGt, sentimentLt, dateGt, dateLt)");
    info!("   POST /api/smashing  - Store a new smashing");
    info!("   Static files served from {}", cfg.public_dir.display());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Err(e) = store.close().await {
        warn!("Failed to close store cleanly: {e:#}");
    }

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
