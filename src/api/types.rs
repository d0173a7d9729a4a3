//! Shared types for the dashboard API layer.

use std::sync::Arc;

use uuid::Uuid;

use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the dashboard router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Session context: injected by session middleware
// ═══════════════════════════════════════════════════════════

/// Id of the live session the request belongs to, inserted into request
/// extensions after the session middleware resolved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSession(pub Uuid);
