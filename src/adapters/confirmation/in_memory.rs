//! In-memory confirmation store.
//!
//! A process-wide, append-only set of session ids known to be paid. This is
//! the production implementation: the payment provider remains the system
//! of record, so losing this state on restart is acceptable. The next
//! status poll or certificate request re-derives confirmation from the
//! provider's live status.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{ConfirmationStore, ConfirmationStoreError};

/// Concurrent in-memory set of known-paid session ids.
///
/// Insert-if-absent and lookup may race freely between the webhook path and
/// the polling path; set semantics make the insert commutative, so no
/// ordering between the two paths is required.
#[derive(Default)]
pub struct InMemoryConfirmationStore {
    paid_sessions: RwLock<HashSet<String>>,
}

impl InMemoryConfirmationStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of confirmed sessions (for test assertions).
    pub async fn len(&self) -> usize {
        self.paid_sessions.read().await.len()
    }

    /// Whether no sessions have been confirmed yet.
    pub async fn is_empty(&self) -> bool {
        self.paid_sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ConfirmationStore for InMemoryConfirmationStore {
    async fn mark_paid(&self, session_id: &str) -> Result<(), ConfirmationStoreError> {
        let mut paid = self.paid_sessions.write().await;
        if paid.insert(session_id.to_string()) {
            tracing::debug!(session_id = %session_id, "Session recorded as paid");
        }
        Ok(())
    }

    async fn is_paid(&self, session_id: &str) -> Result<bool, ConfirmationStoreError> {
        Ok(self.paid_sessions.read().await.contains(session_id))
    }
}
