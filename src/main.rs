//! Application entry point and server initialization
//!
//! Loads configuration, opens the store and serves the API until SIGINT or
//! SIGTERM.

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use url_shortener::config::Config;
use url_shortener::database::{init_db, AppState};
use url_shortener::route::create_app;
use url_shortener::store::UrlStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("url_shortener=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    // Schema setup runs once here; it is a no-op on an existing file
    let db = init_db(&config.database_path)?;
    let state = AppState::new(UrlStore::new(db), config.base_url.clone());

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.listen_addr()).await?;

    info!(listen_addr = %listener.local_addr()?, database = %config.database_path, "URL shortener running");
    info!("POST /api/shorten  - shorten a URL");
    info!("GET  /api/urls     - list all URLs");
    info!("GET  /api/stats    - totals");
    info!("GET  /api/health   - health check");
    info!("GET  /{{code}}       - redirect to the original URL");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) or, on Unix, SIGTERM.
///
/// Letting in-flight requests finish keeps an open write transaction from
/// being cut off halfway.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
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

    info!("shutdown signal received, stopping server");
}
