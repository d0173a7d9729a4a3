//! In-memory registry of live dashboard sessions.
//!
//! Each browser tab starts its own session and carries the id on every
//! request. Sessions are never persisted; ending one drops its history,
//! cached OCR values and pending notices.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::context::SessionContext;

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {0} not found (expired or never started)")]
    NotFound(Uuid),
    #[error("Session store lock poisoned")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

pub struct SessionStore {
    sessions: HashMap<Uuid, SessionContext>,
    max_idle: Duration,
}

impl SessionStore {
    /// Create an empty store. Sessions idle longer than `max_idle` are
    /// evicted whenever a new session starts.
    pub fn new(max_idle: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            max_idle,
        }
    }

    /// Start a fresh session and return its id.
    pub fn create(&mut self) -> Uuid {
        self.create_at(Utc::now())
    }

    fn create_at(&mut self, now: DateTime<Utc>) -> Uuid {
        let evicted = self.evict_idle(now);
        if evicted > 0 {
            tracing::info!(evicted, "Dropped idle sessions");
        }

        let ctx = SessionContext::new();
        let id = ctx.id();
        self.sessions.insert(id, ctx);
        id
    }

    pub fn get(&self, id: &Uuid) -> Result<&SessionContext, SessionError> {
        self.sessions.get(id).ok_or(SessionError::NotFound(*id))
    }

    /// Mutable access; marks the session active.
    pub fn get_mut(&mut self, id: &Uuid) -> Result<&mut SessionContext, SessionError> {
        let ctx = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::NotFound(*id))?;
        ctx.touch(Utc::now());
        Ok(ctx)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains_key(id)
    }

    /// Tear down a session, returning its final state.
    pub fn end(&mut self, id: &Uuid) -> Result<SessionContext, SessionError> {
        self.sessions.remove(id).ok_or(SessionError::NotFound(*id))
    }

    /// Drop every session whose last activity is older than the idle limit.
    pub fn evict_idle(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        let max_idle = self.max_idle;
        self.sessions
            .retain(|_, ctx| now.signed_duration_since(ctx.last_active()) <= max_idle);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::minutes(crate::config::SESSION_IDLE_MINUTES))
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Disease;
    use crate::session::PredictionRecord;

    #[test]
    fn new_store_is_empty() {
        let store = SessionStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn create_registers_session() {
        let mut store = SessionStore::default();
        let id = store.create();
        assert!(store.contains(&id));
        assert_eq!(store.get(&id).unwrap().id(), id);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let mut store = SessionStore::default();
        let missing = Uuid::new_v4();
        match store.get_mut(&missing) {
            Err(SessionError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("Expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn sessions_do_not_share_history() {
        let mut store = SessionStore::default();
        let a = store.create();
        let b = store.create();

        store
            .get_mut(&a)
            .unwrap()
            .history_mut()
            .append(PredictionRecord::new(Disease::Diabetes, &[1.0; 8], 1, None));

        assert_eq!(store.get(&a).unwrap().history().len(), 1);
        assert!(store.get(&b).unwrap().history().is_empty());
    }

    #[test]
    fn end_removes_session_and_returns_state() {
        let mut store = SessionStore::default();
        let id = store.create();
        store
            .get_mut(&id)
            .unwrap()
            .history_mut()
            .append(PredictionRecord::new(Disease::Thyroid, &[0.0; 7], 0, None));

        let ended = store.end(&id).unwrap();
        assert_eq!(ended.history().len(), 1);
        assert!(!store.contains(&id));
        assert!(matches!(store.end(&id), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn idle_sessions_evicted_on_create() {
        let mut store = SessionStore::new(Duration::minutes(5));
        let stale = store.create();
        let later = Utc::now() + Duration::minutes(10);

        let fresh = store.create_at(later);
        assert!(!store.contains(&stale));
        assert!(store.contains(&fresh));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn active_sessions_survive_eviction() {
        let mut store = SessionStore::new(Duration::minutes(5));
        let id = store.create();
        assert_eq!(store.evict_idle(Utc::now() + Duration::minutes(1)), 0);
        assert!(store.contains(&id));
    }
}
