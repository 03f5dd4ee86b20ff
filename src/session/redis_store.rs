use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::store::{AUTH_TOKEN_KEY, SessionEntries, SessionError, SessionStore, USER_DATA_KEY};

/// Sessions kept in Redis as one hash per session: `session:{id}` with the
/// `auth-token` and `user-data` fields, expiring with the session TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    redis: Arc<RedisClient>,
}

impl RedisSessionStore {
    pub fn new(redis: RedisClient) -> Self {
        Self {
            redis: Arc::new(redis),
        }
    }

    fn key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionEntries>, SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let mut fields: HashMap<String, String> = conn.hgetall(Self::key(session_id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }

        Ok(Some(SessionEntries {
            auth_token: fields.remove(AUTH_TOKEN_KEY),
            user_data: fields.remove(USER_DATA_KEY),
        }))
    }

    async fn save(
        &self,
        session_id: &str,
        entries: &SessionEntries,
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let key = Self::key(session_id);

        let fields: Vec<(&str, &str)> = [
            (AUTH_TOKEN_KEY, entries.auth_token.as_deref()),
            (USER_DATA_KEY, entries.user_data.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect();

        // MULTI/EXEC so readers never observe a half-written session
        let mut pipe = redis::pipe();
        pipe.atomic().del(&key).ignore();
        if !fields.is_empty() {
            pipe.hset_multiple(&key, &fields)
                .ignore()
                .expire(&key, ttl.as_secs().max(1) as i64)
                .ignore();
        }
        pipe.query_async::<()>(&mut conn).await?;

        tracing::debug!(fields = fields.len(), "session stored");
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.del(Self::key(session_id)).await?;
        Ok(())
    }
}
