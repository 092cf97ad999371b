use std::{net::SocketAddr, path::PathBuf};

use bloodlink::{build_router, load_config, store, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloodlink=debug,tower_http=debug".into()),
        )
        .init();

    let config = load_config()?;
    tracing::info!("Loaded configuration:\n{}", config);

    // The one store handle for the whole process
    let store = store::open(&config.database).await?;
    let state = AppState::new(store);

    let static_dir = config.server.static_dir.as_ref().map(PathBuf::from);
    let app = build_router(state, static_dir.as_deref());

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
