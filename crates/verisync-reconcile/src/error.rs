//! Reconciliation error types.

use thiserror::Error;

use verisync_core::errors::CoreError;

/// Errors from the equipment store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached or queried at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// An update targeted a record that does not exist.
    #[error("Equipment not found: {0}")]
    NotFound(String),

    /// The write was rejected or could not be persisted.
    #[error("Write failed for {id}: {reason}")]
    WriteFailed { id: String, reason: String },

    /// The update breaks a domain rule for the stored record.
    #[error(transparent)]
    Rejected(#[from] CoreError),
}

/// Errors from the notification collaborator. Logged, never retried in-line.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Errors that abort a whole reconciliation invocation.
///
/// Per-record failures never surface here; they are counted in the summary.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Eligible records could not be selected.
    #[error("Equipment selection failed: {0}")]
    Store(#[from] StoreError),
}
