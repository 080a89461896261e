//! Task store port — a versioned, shared task collection.
//!
//! The trait itself is the minimal serializability primitive: a snapshot
//! carrying a version token, and a compare-and-swap commit. Everything else
//! (`get_all`, `put`, `update`, `delete`) is built on top of it here, so
//! every adapter gets the same read-decide-write discipline for free.

use chrono::{DateTime, Utc};
use log::warn;

use crate::error::StoreError;
use crate::task::{Task, TaskPatch};

/// A consistent view of the stored collection plus its version token.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    /// The stored tasks at the time of the snapshot.
    pub tasks: Vec<Task>,
    /// Version token to pass back to [`TaskStore::commit`].
    pub version: u64,
}

/// Persistent task collection shared across detection passes.
///
/// Implementations guarantee that `commit` succeeds only when
/// `expected_version` still matches the stored version; concurrent writers
/// therefore serialize, and a lost race surfaces as
/// [`StoreError::Conflict`] rather than a lost update or a duplicate.
pub trait TaskStore: Send + Sync {
    /// Reads the current collection and its version token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::Serialize`] when
    /// the backing storage cannot be read.
    fn snapshot(&self) -> Result<TaskSnapshot, StoreError>;

    /// Replaces the collection if the version still matches.
    ///
    /// Returns the new version on success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when another writer committed since
    /// the snapshot was taken, or an unavailability/serialization error.
    fn commit(&self, tasks: Vec<Task>, expected_version: u64) -> Result<u64, StoreError>;
}

/// Returns all stored tasks.
///
/// # Errors
///
/// Propagates snapshot failures from the store.
pub fn get_all(store: &dyn TaskStore) -> Result<Vec<Task>, StoreError> {
    Ok(store.snapshot()?.tasks)
}

/// Inserts a task without duplicate checking.
///
/// Detection and manual entry should go through
/// [`crate::task::reconcile::reconcile`] instead; this is the raw store
/// operation it is built from.
///
/// # Errors
///
/// Propagates store failures; a lost commit race is retried once and then
/// surfaced as [`StoreError::Conflict`].
pub fn put(store: &dyn TaskStore, task: Task) -> Result<(), StoreError> {
    mutate(store, &mut |tasks| {
        tasks.push(task.clone());
        Ok(())
    })
}

/// Applies a partial update to the task with the given id.
///
/// Returns the updated task.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when the id is absent,
/// [`StoreError::Rejected`] when the patch carries a status change the task
/// lifecycle forbids, and propagates commit conflicts after one retry.
pub fn update(
    store: &dyn TaskStore,
    id: &str,
    patch: &TaskPatch,
    now: DateTime<Utc>,
) -> Result<Task, StoreError> {
    let mut updated: Option<Task> = None;
    mutate(store, &mut |tasks| {
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(task, now).map_err(|e| StoreError::Rejected(e.to_string()))?;
        updated = Some(task.clone());
        Ok(())
    })?;
    // `mutate` only returns Ok after the closure ran and committed.
    updated.ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// Deletes the task with the given id.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] when the id is absent, and propagates
/// commit conflicts after one retry.
pub fn delete(store: &dyn TaskStore, id: &str) -> Result<(), StoreError> {
    mutate(store, &mut |tasks| {
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    })
}

/// Runs a read-decide-write cycle with one retry on a lost race.
fn mutate(
    store: &dyn TaskStore,
    apply: &mut dyn FnMut(&mut Vec<Task>) -> Result<(), StoreError>,
) -> Result<(), StoreError> {
    let mut retried = false;
    loop {
        let snapshot = store.snapshot()?;
        let mut tasks = snapshot.tasks;
        apply(&mut tasks)?;
        match store.commit(tasks, snapshot.version) {
            Ok(_) => return Ok(()),
            Err(StoreError::Conflict { expected, actual }) if !retried => {
                warn!("store commit lost race (expected v{expected}, found v{actual}); retrying");
                retried = true;
            }
            Err(e) => return Err(e),
        }
    }
}
