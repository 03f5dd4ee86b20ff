use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

pub const AUTH_TOKEN_KEY: &str = "auth-token";
pub const USER_DATA_KEY: &str = "user-data";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("failed to serialize session: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raw session entries as they sit in the store.
///
/// The user record stays serialized so that a corrupted entry is only
/// noticed (and tolerated) when somebody reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEntries {
    pub auth_token: Option<String>,
    pub user_data: Option<String>,
}

impl SessionEntries {
    pub fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.user_data.is_none()
    }
}

/// Server-side storage for sessions keyed by the session cookie value.
///
/// `save` replaces both entries in one step; implementations must never leave
/// a token without its user record or the other way round.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<SessionEntries>, SessionError>;

    async fn save(
        &self,
        session_id: &str,
        entries: &SessionEntries,
        ttl: Duration,
    ) -> Result<(), SessionError>;

    async fn remove(&self, session_id: &str) -> Result<(), SessionError>;
}

const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Process-local store, used for development and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, (SessionEntries, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionEntries>, SessionError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some((entries, expires_at)) if *expires_at > now => {
                    return Ok(Some(entries.clone()));
                }
                Some(_) => {}
            }
        }

        // expired
        self.sessions.write().await.remove(session_id);
        Ok(None)
    }

    async fn save(
        &self,
        session_id: &str,
        entries: &SessionEntries,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        if entries.is_empty() {
            sessions.remove(session_id);
        } else {
            sessions.insert(
                session_id.to_string(),
                (entries.clone(), now + ttl.min(MAX_TTL)),
            );
        }
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
