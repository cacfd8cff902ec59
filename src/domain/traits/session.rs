use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::{SessionState, UserId};

/// Exclusive access to one user's state
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Per-user session storage, partitioned by user id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Handle to the user's session, created empty on first use
    async fn session(&self, user_id: UserId) -> SessionHandle;
}
