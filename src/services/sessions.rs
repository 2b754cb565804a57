use crate::domain::flow::CoachingSession;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory coaching sessions. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, CoachingSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> CoachingSession {
        let session = CoachingSession::new(Uuid::new_v4(), Utc::now());
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        tracing::debug!("Created coaching session {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Option<CoachingSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Runs `f` against the stored session and returns its result,
    /// or `None` if the session does not exist.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Option<T>
    where
        F: FnOnce(&mut CoachingSession) -> T,
    {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(f)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions untouched for `ttl` as of `now`; returns how many were removed.
    pub async fn prune_idle(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(ttl, now));
        before - sessions.len()
    }
}
