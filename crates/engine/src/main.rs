use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use regflow_engine::{
    config::Config,
    metrics,
    server::Server,
    store::{MemoryStore, SessionStore},
    workflow::WorkflowEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load()?;
    info!("Loaded configuration: {:?}", config);

    metrics::register_metrics();

    let timeout = chrono::Duration::seconds(config.session.timeout_secs as i64);
    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new(timeout));
    let engine = Arc::new(WorkflowEngine::new(store));

    // Periodic sweep on top of on-access expiry, so idle sessions do not
    // pile up between requests.
    let sweeper = engine.clone();
    let sweep_interval = Duration::from_secs(config.session.sweep_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            if let Err(e) = sweeper.cleanup_expired().await {
                warn!("session sweep failed: {}", e);
            }
        }
    });

    let server = Server::new(engine);
    info!("Starting server on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
