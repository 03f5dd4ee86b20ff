//! Server-side sessions.
//!
//! A session is created by the login handler, read on every request through
//! the [`Session`] extractor and torn down by logout. The browser only holds
//! an opaque id in the `session-id` cookie.

mod redis_store;
mod store;

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, error};
use uuid::Uuid;

use crate::AppState;
use crate::api::IssuedSession;
use crate::api::models::User;

pub use self::redis_store::RedisSessionStore;
pub use self::store::{
    AUTH_TOKEN_KEY, MemorySessionStore, SessionEntries, SessionError, SessionStore, USER_DATA_KEY,
};

pub const SESSION_COOKIE: &str = "session-id";

/// The caller's session as seen by one request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: Option<String>,
    entries: SessionEntries,
}

impl Session {
    pub fn new(id: impl Into<String>, entries: SessionEntries) -> Self {
        Self {
            id: Some(id.into()),
            entries,
        }
    }

    /// Resolves the session referenced by the request cookies. Missing,
    /// expired or unreadable sessions all come back anonymous.
    pub async fn load(store: &dyn SessionStore, jar: &CookieJar) -> Self {
        let Some(id) = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string()) else {
            return Self::default();
        };

        match store.load(&id).await {
            Ok(Some(entries)) => Self::new(id, entries),
            Ok(None) => {
                debug!("session cookie references no live session");
                Self::default()
            }
            Err(e) => {
                error!("failed to load session: {}", e);
                Self::default()
            }
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.entries
            .auth_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// The stored member record, or `None` when absent or unparseable.
    pub fn user(&self) -> Option<User> {
        let raw = self.entries.user_data.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("failed to parse stored user data: {}", e);
                None
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.is_admin())
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // the access guard already resolved it
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Session::load(state.sessions.as_ref(), &jar).await)
    }
}

/// Persists a freshly issued token together with its user and returns the
/// cookie that points at it.
pub async fn start(
    store: &dyn SessionStore,
    issued: &IssuedSession,
    ttl: Duration,
    secure: bool,
) -> Result<Cookie<'static>, SessionError> {
    let id = Uuid::new_v4().to_string();
    let entries = SessionEntries {
        auth_token: Some(issued.token.clone()),
        user_data: Some(serde_json::to_string(&issued.user)?),
    };
    store.save(&id, &entries, ttl).await?;

    Ok(Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build())
}

/// Clears both entries and expires the cookie.
pub async fn end(
    store: &dyn SessionStore,
    session: &Session,
    jar: CookieJar,
) -> Result<CookieJar, SessionError> {
    if let Some(id) = session.id() {
        store.remove(id).await?;
    }
    Ok(jar.remove(Cookie::build(SESSION_COOKIE).path("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_json(membresia: i32) -> String {
        serde_json::json!({
            "id": 1,
            "rfc": "PEJJ800101AB1",
            "nombre": "Juan Pérez",
            "correoElectronico": "juan@example.com",
            "membresia": membresia,
            "membresiaNombre": "Titular",
            "estatus": "activo"
        })
        .to_string()
    }

    fn session_with(token: Option<&str>, user: Option<String>) -> Session {
        Session::new(
            "sid",
            SessionEntries {
                auth_token: token.map(str::to_string),
                user_data: user,
            },
        )
    }

    #[test]
    fn anonymous_session() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn admin_requires_role_code_two() {
        assert!(session_with(Some("t"), Some(user_json(2))).is_admin());
        assert!(!session_with(Some("t"), Some(user_json(1))).is_admin());
        assert!(!session_with(Some("t"), Some(user_json(3))).is_admin());
        assert!(!session_with(Some("t"), None).is_admin());
    }

    #[test]
    fn corrupted_user_fails_soft() {
        let session = session_with(Some("t"), Some("{not json".into()));
        assert!(session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        assert!(!session_with(Some(""), Some(user_json(1))).is_authenticated());
    }

    #[tokio::test]
    async fn start_then_end_clears_both_entries() {
        let store = MemorySessionStore::new();
        let issued = IssuedSession {
            token: "abc".into(),
            user: serde_json::from_str(&user_json(1)).unwrap(),
        };

        let cookie = start(&store, &issued, Duration::from_secs(60), false)
            .await
            .unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));

        let jar = CookieJar::new().add(cookie);
        let session = Session::load(&store, &jar).await;
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user().map(|u| u.id), Some(1));

        let jar = end(&store, &session, jar).await.unwrap();
        let stored = store.load(session.id().unwrap()).await.unwrap();
        assert!(stored.is_none());
        assert!(!Session::load(&store, &jar).await.is_authenticated());
    }
}
