//! AERN daemon - emergency response coordination service.
//!
//! Accepts emergency reports over REST, analyzes them through a remote
//! chat-completion service, and tracks incident lifecycles in memory.

use aernd::config::Config;
use aernd::coordinator::LifecycleCoordinator;
use aernd::llm::AnalysisClient;
use aernd::server::{self, AppState};
use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("AERN daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let client = AnalysisClient::new(&config.remote)?;

    if client.ping().await {
        info!("Remote analysis endpoint reachable: {}", config.remote.base_url);
    } else {
        warn!("Remote analysis endpoint unreachable, running on static fallbacks");
    }

    let coordinator = LifecycleCoordinator::new(client);
    let state = AppState::new(coordinator);

    server::run(state, &config.daemon.bind_addr).await
}
