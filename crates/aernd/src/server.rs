//! HTTP server for aernd.

use crate::coordinator::LifecycleCoordinator;
use crate::routes;
use crate::store::{create_shared_store, SharedStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub store: SharedStore,
    pub coordinator: LifecycleCoordinator,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(coordinator: LifecycleCoordinator) -> Self {
        Self {
            store: create_shared_store(),
            coordinator,
            start_time: Instant::now(),
        }
    }
}

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::emergency_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c.
pub async fn run(state: AppState, bind_addr: &str) -> Result<()> {
    let app = app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("  Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("  Shutting down gracefully");
}
