//! HTTP server for the vertical reading study tool
//!
//! Serves the study form page, the table and research fragments, the CSV
//! export, and the embedded client assets.

pub mod routes;
pub mod state;
mod static_files;

pub use state::ServerAppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router
pub fn build_router(state: ServerAppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/create-study", post(routes::create_study))
        .route("/research", post(routes::research))
        .route("/export-csv", post(routes::export_csv))
        .route("/health", get(routes::health))
        .fallback(static_files::serve_static)
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(port: u16, bind: &str, state: ServerAppState) -> Result<(), String> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Vertical study server listening on http://{}", addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for shutdown signal: {}", e);
        } else {
            log::info!("Shutdown signal received, stopping server...");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}
