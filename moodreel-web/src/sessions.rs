//! Per-browser search sessions
//!
//! Each browser gets its own search session, keyed by a server-issued id in
//! the `moodreel_session` cookie. Sessions idle longer than the configured
//! timeout are dropped whenever a new one is created; dropping the last
//! handle stops the session actor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use moodreel_search::{CatalogProvider, SearchSessionHandle, spawn_search_session};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::server::AppState;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "moodreel_session";

/// Search session bound to the current request.
#[derive(Debug, Clone)]
pub struct ClientSession {
    /// Server-issued session id
    pub id: Uuid,
    /// Handle to this browser's search session
    pub handle: SearchSessionHandle,
}

struct SessionEntry {
    handle: SearchSessionHandle,
    last_seen: Instant,
}

/// Registry of live search sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    provider: Arc<dyn CatalogProvider>,
    idle_timeout: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    /// Creates an empty registry whose sessions search through `provider`.
    pub fn new(provider: Arc<dyn CatalogProvider>, idle_timeout: Duration) -> Self {
        Self {
            provider,
            idle_timeout,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the session for `id`, spawning a fresh one for a missing or
    /// unknown id. The flag is true when the session was just created.
    pub async fn resolve(&self, id: Option<Uuid>) -> (ClientSession, bool) {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();

        if let Some(entry) = id.and_then(|id| sessions.get_mut(&id).map(|entry| (id, entry))) {
            let (id, entry) = entry;
            entry.last_seen = now;
            let session = ClientSession {
                id,
                handle: entry.handle.clone(),
            };
            return (session, false);
        }

        let idle_timeout = self.idle_timeout;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Dropped idle search sessions");
        }

        let id = Uuid::new_v4();
        let handle = spawn_search_session(Arc::clone(&self.provider));
        sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        tracing::debug!(%id, live = sessions.len(), "Started search session");

        (ClientSession { id, handle }, true)
    }

    /// Handle of a live session, without refreshing its idle timer.
    pub async fn get(&self, id: &Uuid) -> Option<SearchSessionHandle> {
        self.sessions
            .lock()
            .await
            .get(id)
            .map(|entry| entry.handle.clone())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// True when no session is live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// Reads the session id from the request's cookies.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn session_cookie(id: Uuid) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

/// Middleware attaching a [`ClientSession`] to every request.
///
/// Issues the session cookie on the response when a new session was started.
pub async fn attach_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let presented = session_id_from_headers(request.headers());
    let (session, created) = state.sessions.resolve(presented).await;
    let id = session.id;
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;
    if created {
        if let Some(cookie) = session_cookie(id) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }
    response
}
