use std::sync::Arc;
use std::time::Duration;

use moka::policy::EvictionPolicy;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::engine::Session;
use crate::error::AppError;

/// Handle to one session; the lock serialises requests on that session only
pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session store
///
/// Sessions expire after `idle_ttl_secs` without access and the store holds
/// at most `max_sessions` entries. When full, the least recently used session
/// is evicted so a freshly created one is always admitted.
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .eviction_policy(EvictionPolicy::lru())
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self { sessions }
    }

    /// Create a fresh session on the Welcome page
    pub async fn create(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new()));
        self.sessions.insert(id, handle.clone()).await;
        tracing::debug!("Created session {}", id);
        (id, handle)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .get(&id)
            .await
            .ok_or(AppError::SessionNotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .remove(&id)
            .await
            .map(|_| tracing::debug!("Removed session {}", id))
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interest, Page};

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(100, 60);
        let (id, handle) = store.create().await;
        handle.lock().await.start().unwrap();

        let again = store.get(id).await.unwrap();
        assert_eq!(again.lock().await.page(), Page::SelectInterests);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(100, 60);
        let (a, _) = store.create().await;
        let (b, _) = store.create().await;

        {
            let handle = store.get(a).await.unwrap();
            let mut session = handle.lock().await;
            session.start().unwrap();
            session.toggle(Interest::Coding, true).unwrap();
        }

        let other = store.get(b).await.unwrap();
        let other = other.lock().await;
        assert_eq!(other.page(), Page::Welcome);
        assert!(other.selection().is_empty());
    }

    #[tokio::test]
    async fn test_new_session_admitted_when_full() {
        let store = SessionStore::new(2, 60);
        let (a, _) = store.create().await;
        let (b, _) = store.create().await;
        for _ in 0..5 {
            store.get(a).await.unwrap();
            store.get(b).await.unwrap();
        }
        store.sessions.run_pending_tasks().await;

        let (c, _) = store.create().await;
        store.sessions.run_pending_tasks().await;

        let handle = store.get(c).await.unwrap();
        assert_eq!(handle.lock().await.page(), Page::Welcome);
        assert!(store.len() <= 2);
    }

    #[tokio::test]
    async fn test_remove_and_missing() {
        let store = SessionStore::new(100, 60);
        let (id, _) = store.create().await;
        store.remove(id).await.unwrap();
        assert!(matches!(store.get(id).await, Err(AppError::SessionNotFound(_))));
        assert!(store.remove(Uuid::new_v4()).await.is_err());
    }
}
