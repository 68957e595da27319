mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::workflow::WorkflowEngine;

/// HTTP surface the external tool dispatcher drives the engine through.
pub struct Server {
    engine: Arc<WorkflowEngine>,
}

impl Server {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/metrics", get(routes::metrics))
            .route("/sessions", post(routes::create_session))
            .route("/sessions/{id}", get(routes::get_session))
            .route("/sessions/{id}/summary", get(routes::workflow_summary))
            .route("/sessions/{id}/tools/{tool}", post(routes::execute_tool))
            .route("/sessions/{id}/auto-execute", post(routes::auto_execute))
            .layer(TraceLayer::new_for_http())
            .with_state(self.engine)
    }

    pub async fn start(self, addr: &str) -> crate::Result<()> {
        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("listening on {}", addr);
        axum::serve(listener, router).await?;
        Ok(())
    }
}
