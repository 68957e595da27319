pub mod classifier;
pub mod config;
pub mod metrics;
pub mod registry;
pub mod server;
pub mod store;
pub mod workflow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Dependencies unsatisfied for {tool}: missing {missing:?}")]
    DependencyUnsatisfied {
        tool: String,
        missing: Vec<String>,
        recommended_action: String,
    },
    #[error("Auto-execution unavailable: {0}")]
    AutoExecutionUnavailable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
