//! In-memory session store. Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::presentation::session::Session;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Creates a session, purging any that have been idle longer than the TTL.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let cutoff = Utc::now() - self.ttl;

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active() >= cutoff);
        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, "Purged expired presentation sessions");
        }

        sessions.insert(id, Session::new(id));
        id
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Result<R, AppError> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(f).ok_or_else(|| not_found(id))
    }

    /// Runs `f` under the write lock. `f` must not await; the lock is never
    /// held across a provider call.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        Ok(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::ViewStatus;

    #[tokio::test]
    async fn test_create_read_remove() {
        let store = SessionStore::new(Duration::hours(1));
        let id = store.create().await;

        let status = store.read(id, |s| s.view().status).await.unwrap();
        assert_eq!(status, ViewStatus::Idle);

        store.remove(id).await.unwrap();
        assert!(matches!(
            store.read(id, |s| s.id()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_on_unknown_session_is_not_found() {
        let store = SessionStore::new(Duration::hours(1));
        let err = store.update(Uuid::new_v4(), |s| s.id()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_purged_on_create() {
        let store = SessionStore::new(Duration::seconds(-1));
        store.create().await;
        store.create().await;
        // negative TTL: every existing session is already expired
        assert_eq!(store.len().await, 1);
    }
}
