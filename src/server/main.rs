//! Geographic context server.
//!
//! Exposes altitude, administrative units, cadastral parcels and urbanism
//! lookups for a coordinate, backed by the Géoplateforme services.

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use geocontext::geoplateforme::GeoplateformeClient;

mod config;
mod handlers;

use config::{init_logging, Args};
use handlers::{
    admin_units_handler, altitude_handler, cadastral_parcels_handler, health_handler,
    urbanism_handler, AppState,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.log_format)?;
    info!(
        "LOG_FORMAT={}, LOG_LEVEL={}",
        args.log_format, args.log_level
    );

    let client = GeoplateformeClient::new(args.endpoints()?, args.selection)?;
    info!("SELECTION={}", client.selection());

    let state = Arc::new(AppState { client });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/gpf/altitude", get(altitude_handler))
        .route("/api/gpf/adminexpress", get(admin_units_handler))
        .route("/api/gpf/parcellaire-express", get(cadastral_parcels_handler))
        .route("/api/gpu/urbanisme", get(urbanism_handler))
        .fallback_service(ServeDir::new(&args.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listen = args.listen_addr();
    info!("Starting geocontext on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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

    warn!("Shutting down (signal received)");
}
