//! In-memory session storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::{SessionState, UserId};
use crate::domain::traits::{SessionHandle, SessionStore};

/// Session map keyed by user, each entry behind its own lock
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<UserId, SessionHandle>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn session(&self, user_id: UserId) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(&user_id) {
            return handle.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(SessionState::new())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Catalog;

    #[tokio::test]
    async fn test_session_created_once_per_user() {
        let store = MemorySessionStore::new();

        let first = store.session(1).await;
        first.lock().await.agree();
        let again = store.session(1).await;

        assert!(Arc::ptr_eq(&first, &again));
        assert!(again.lock().await.agreed);
        assert_eq!(store.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_partitioned() {
        let store = MemorySessionStore::new();
        let catalog = Catalog::builtin();

        store.session(1).await.lock().await.add_to_cart(&catalog, 1, 2).unwrap();

        assert!(store.session(2).await.lock().await.cart.is_empty());
        assert_eq!(store.session(1).await.lock().await.cart.len(), 1);
    }
}
