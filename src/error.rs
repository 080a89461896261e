//! Error types for the store and alert boundaries.
//!
//! Soft misses inside the detection pipeline (no pattern hit, unparseable
//! date, past-dated candidate) are represented as `None`/empty results, not
//! errors. These enums cover the external collaborators only.

use thiserror::Error;

/// Errors surfaced by [`crate::ports::store::TaskStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested task id does not exist in the store.
    #[error("task not found: {0}")]
    NotFound(String),

    /// A compare-and-swap commit lost the race against a concurrent writer.
    ///
    /// Callers retry once with a fresh snapshot; a second conflict is
    /// reported to the caller, who decides whether to drop or re-queue.
    #[error("store version conflict: expected {expected}, found {actual}")]
    Conflict {
        /// Version the writer read before deciding.
        expected: u64,
        /// Version the store actually holds.
        actual: u64,
    },

    /// An update was refused, e.g. a status change the task lifecycle
    /// forbids.
    #[error("update rejected: {0}")]
    Rejected(String),

    /// The backing store is unreachable or failed to read/write.
    #[error("task store unavailable: {0}")]
    Unavailable(String),

    /// The stored collection could not be encoded or decoded.
    #[error("task store serialization failed: {0}")]
    Serialize(String),
}

/// Errors surfaced by [`crate::ports::alerts::AlertSink`] implementations.
///
/// Alert delivery is fire-and-forget; a failed notification is logged and
/// must never abort a sweep or the detection pipeline.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The notification channel is unreachable.
    #[error("alert sink unavailable: {0}")]
    Unavailable(String),
}
