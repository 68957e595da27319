use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::{Session, SessionStore};
use crate::metrics::SESSIONS_EXPIRED_TOTAL;

/// In-memory session store with lazy on-access expiry. Sessions are
/// lost on process restart.
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, Session>>,
    timeout: Duration,
}

impl MemoryStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            timeout,
        }
    }

    fn is_expired(&self, session: &Session) -> bool {
        Utc::now() - session.last_accessed_at >= self.timeout
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, session: Session) -> crate::Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> crate::Result<Option<Session>> {
        // Write lock: a hit refreshes last_accessed_at, a stale hit evicts.
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if self.is_expired(session) => {
                debug!(session_id = %id, "evicting expired session");
                sessions.remove(id);
                SESSIONS_EXPIRED_TOTAL.inc();
                Ok(None)
            }
            Some(session) => {
                session.touch();
                Ok(Some(session.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, mut session: Session) -> crate::Result<()> {
        session.touch();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn delete(&self, id: &str) -> crate::Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> crate::Result<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| Utc::now() - s.last_accessed_at < self.timeout);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "swept expired sessions");
            SESSIONS_EXPIRED_TOTAL.inc_by(removed as u64);
        }
        Ok(removed)
    }
}
