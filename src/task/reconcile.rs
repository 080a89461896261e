//! Reconciliation — atomic merge of candidate tasks into the store with
//! duplicate suppression.
//!
//! Every insertion path (detection batches, manual entry) goes through
//! [`reconcile`]; there is no other duplicate check anywhere.

use chrono::Duration;
use log::warn;

use crate::error::StoreError;
use crate::ports::store::TaskStore;
use crate::task::Task;

/// How two tasks are judged to be the same real-world deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateMode {
    /// Equal title and equal deadline. Used for detections confined to one
    /// page and for manual entry.
    PageLocal,
    /// Same source URL, overlapping description/context, and deadlines
    /// within a 24-hour tolerance window.
    CrossPage,
}

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The candidate was new and is now stored.
    Inserted {
        /// Id of the stored task.
        id: String,
    },
    /// The candidate duplicated an existing task and was discarded. The
    /// existing task's user-editable fields are untouched.
    Duplicate {
        /// Id of the task it duplicated.
        existing_id: String,
    },
}

/// Merges one candidate into the store, atomically.
///
/// The get-existing / decide / put sequence runs against one snapshot and
/// commits with its version token; a lost race is retried once with a
/// fresh read.
///
/// # Errors
///
/// Propagates store failures; a second consecutive
/// [`StoreError::Conflict`] is surfaced to the caller, who decides whether
/// to drop or re-queue the candidate.
pub fn reconcile(
    store: &dyn TaskStore,
    candidate: &Task,
    mode: DuplicateMode,
) -> Result<ReconcileOutcome, StoreError> {
    let mut retried = false;
    loop {
        let snapshot = store.snapshot()?;
        if let Some(existing) = snapshot.tasks.iter().find(|t| is_duplicate(candidate, t, mode)) {
            return Ok(ReconcileOutcome::Duplicate { existing_id: existing.id.clone() });
        }
        let mut tasks = snapshot.tasks;
        tasks.push(candidate.clone());
        match store.commit(tasks, snapshot.version) {
            Ok(_) => return Ok(ReconcileOutcome::Inserted { id: candidate.id.clone() }),
            Err(StoreError::Conflict { expected, actual }) if !retried => {
                warn!(
                    "reconcile lost race for candidate {} (expected v{expected}, found v{actual}); retrying",
                    candidate.id
                );
                retried = true;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Reconciles a whole detection batch, candidate by candidate.
///
/// Candidates within the batch also deduplicate against each other, since
/// each reconciliation sees the inserts of the previous ones.
///
/// # Errors
///
/// Stops at the first store failure; earlier outcomes are lost to the
/// caller but the inserted tasks remain stored.
pub fn reconcile_batch(
    store: &dyn TaskStore,
    candidates: &[Task],
    mode: DuplicateMode,
) -> Result<Vec<ReconcileOutcome>, StoreError> {
    candidates.iter().map(|candidate| reconcile(store, candidate, mode)).collect()
}

/// Duplicate test for the given mode.
#[must_use]
pub fn is_duplicate(candidate: &Task, existing: &Task, mode: DuplicateMode) -> bool {
    match mode {
        DuplicateMode::PageLocal => {
            candidate.title == existing.title && candidate.deadline == existing.deadline
        }
        DuplicateMode::CrossPage => {
            let within_window = (candidate.deadline - existing.deadline).abs() <= Duration::hours(24);
            candidate.source_url == existing.source_url
                && within_window
                && descriptions_overlap(candidate, existing)
        }
    }
}

/// True when either task's description appears in the other's context (or
/// the descriptions are equal).
fn descriptions_overlap(a: &Task, b: &Task) -> bool {
    a.description == b.description
        || b.context.contains(&a.description)
        || a.context.contains(&b.description)
}
