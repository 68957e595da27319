mod memory;
mod models;

pub use memory::MemoryStore;
pub use models::*;

use async_trait::async_trait;

/// Where sessions live. The engine is handed a store rather than owning
/// a global map, so a persistent backend can be swapped in without
/// touching orchestration logic.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: Session) -> crate::Result<()>;
    /// Returns the session if it exists and has not expired, refreshing
    /// its last-access time. An expired session is evicted and reported
    /// as absent.
    async fn get(&self, id: &str) -> crate::Result<Option<Session>>;
    async fn update(&self, session: Session) -> crate::Result<()>;
    async fn delete(&self, id: &str) -> crate::Result<()>;
    /// Removes every expired session; safe to call at any time.
    async fn cleanup_expired(&self) -> crate::Result<usize>;
}
