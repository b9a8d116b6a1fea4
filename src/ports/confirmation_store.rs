//! Confirmation store port for known-paid session ids.
//!
//! The injectable replacement for a process-global set: the webhook path
//! and the polling path both record confirmed payments here, and the
//! certificate issuer consults it before falling back to a live provider
//! query. It is an availability aid, not the source of truth: the
//! provider's live status always overrides a missing entry.
//!
//! # Contract
//!
//! - `mark_paid` is an idempotent, commutative insert; duplicate calls and
//!   racing webhook/poll inserts are harmless
//! - Membership only grows within a process lifetime
//! - An insert is visible to every subsequent lookup in the same process

use async_trait::async_trait;
use thiserror::Error;

/// Port for recording and querying payment confirmations.
#[async_trait]
pub trait ConfirmationStore: Send + Sync {
    /// Record a session id as paid. Idempotent.
    async fn mark_paid(&self, session_id: &str) -> Result<(), ConfirmationStoreError>;

    /// Whether a session id has been recorded as paid.
    async fn is_paid(&self, session_id: &str) -> Result<bool, ConfirmationStoreError>;
}

/// Errors from confirmation store operations.
///
/// The in-memory implementation never fails; the variants exist so a
/// durable implementation can surface storage faults without changing the
/// components that consume the port.
#[derive(Debug, Clone, Error)]
pub enum ConfirmationStoreError {
    /// Underlying storage failure.
    #[error("Confirmation store unavailable: {0}")]
    Unavailable(String),
}
