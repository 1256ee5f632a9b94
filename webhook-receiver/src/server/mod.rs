//! Server module - HTTP server setup and routing.

pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use self::state::AppState;
use crate::ReceiverError;

/// Create the axum application router with all routes.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handlers::webhook_handler))
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::banner))
        .with_state(state)
}

/// Run the server on the specified address.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ReceiverError> {
    info!("Server listening on {}", addr);
    info!("- Webhook endpoint: http://{}/webhook", addr);
    info!("- Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ReceiverError::server(e.to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| ReceiverError::server(e.to_string()))?;
    Ok(())
}
