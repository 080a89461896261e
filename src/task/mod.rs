//! Durable task model and the operations that maintain it.
//!
//! A [`Task`] is created either by the detection pipeline (see
//! [`crate::detect`]) or by manual entry; both paths insert through
//! [`reconcile`] so duplicate suppression lives in exactly one place.

pub mod alerts;
pub mod priority;
pub mod query;
pub mod reconcile;

pub use priority::Priority;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a task.
///
/// Allowed transitions: `pending -> in-progress -> completed` and
/// `pending -> completed`. Nothing transitions out of `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Detected or entered, not started.
    Pending,
    /// Work has started.
    InProgress,
    /// Done; excluded from alerting.
    Completed,
}

/// Rejected status change (e.g. reopening a completed task).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    /// Status the task currently holds.
    pub from: Status,
    /// Status the caller attempted to set.
    pub to: Status,
}

/// A deadline-bearing task, persisted in the task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id within the store.
    pub id: String,
    /// Short human-readable title.
    pub title: String,
    /// The matched text (or manual description) this task came from.
    pub description: String,
    /// Absolute deadline instant.
    pub deadline: DateTime<Utc>,
    /// Urgency band cached at detection time. Advisory only — consumers
    /// recompute from `deadline`/`status`/now before display or alerting.
    pub priority: Priority,
    /// Lifecycle state.
    pub status: Status,
    /// Task-noun keywords found near the match.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Page the task was detected on; `None` for manual entries.
    #[serde(default)]
    pub source_url: Option<String>,
    /// Surrounding chunk text the match was found in.
    #[serde(default)]
    pub context: String,
    /// When detection produced this task.
    pub detected_at: DateTime<Utc>,
    /// When the task entered the store.
    pub created_at: DateTime<Utc>,
    /// When the task was completed, if it was.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Recomputes the urgency band from the deadline and the given instant.
    ///
    /// The stored `priority` field is never consulted.
    #[must_use]
    pub fn current_priority(&self, now: DateTime<Utc>) -> Priority {
        Priority::classify(self.deadline, now)
    }

    /// Applies a status change, enforcing the lifecycle invariant.
    ///
    /// Moving to `Completed` records `completed_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] for any move not allowed by the
    /// lifecycle (including any transition out of `Completed`).
    pub fn transition(&mut self, to: Status, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        let allowed = matches!(
            (self.status, to),
            (Status::Pending, Status::InProgress | Status::Completed)
                | (Status::InProgress, Status::Completed)
        );
        if !allowed {
            return Err(InvalidTransition { from: self.status, to });
        }
        self.status = to;
        if to == Status::Completed {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}

/// Partial update applied through the store's `update` operation.
///
/// Only user-editable fields and the advisory priority cache are patchable;
/// detection provenance (`source_url`, `context`, `detected_at`) is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New status, validated against the lifecycle.
    #[serde(default)]
    pub status: Option<Status>,
    /// Refreshed advisory priority cache.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl TaskPatch {
    /// Applies the patch to a task in place.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the patch carries a status change
    /// the lifecycle forbids; the task is left unmodified in that case.
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) -> Result<(), InvalidTransition> {
        if let Some(status) = self.status {
            // Validate before touching any other field.
            let mut probe = task.clone();
            probe.transition(status, now)?;
            *task = probe;
        }
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task(status: Status) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        Task {
            id: "task_1".into(),
            title: "Submit assignment".into(),
            description: "due Oct 15".into(),
            deadline: Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap(),
            priority: Priority::Low,
            status,
            tags: BTreeSet::new(),
            source_url: None,
            context: String::new(),
            detected_at: now,
            created_at: now,
            completed_at: None,
        }
    }

    #[test]
    fn pending_to_in_progress_to_completed() {
        let now = Utc::now();
        let mut task = sample_task(Status::Pending);
        task.transition(Status::InProgress, now).unwrap();
        task.transition(Status::Completed, now).unwrap();
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.completed_at, Some(now));
    }

    #[test]
    fn pending_straight_to_completed() {
        let mut task = sample_task(Status::Pending);
        task.transition(Status::Completed, Utc::now()).unwrap();
        assert_eq!(task.status, Status::Completed);
    }

    #[test]
    fn completed_is_terminal() {
        let mut task = sample_task(Status::Completed);
        let err = task.transition(Status::Pending, Utc::now()).unwrap_err();
        assert_eq!(err.from, Status::Completed);
        assert_eq!(task.status, Status::Completed);
    }

    #[test]
    fn in_progress_cannot_go_back_to_pending() {
        let mut task = sample_task(Status::InProgress);
        assert!(task.transition(Status::Pending, Utc::now()).is_err());
    }

    #[test]
    fn patch_with_bad_transition_leaves_task_unmodified() {
        let mut task = sample_task(Status::Completed);
        let patch = TaskPatch {
            title: Some("renamed".into()),
            status: Some(Status::Pending),
            ..TaskPatch::default()
        };
        assert!(patch.apply(&mut task, Utc::now()).is_err());
        assert_eq!(task.title, "Submit assignment");
    }

    #[test]
    fn patch_updates_title_and_completes() {
        let now = Utc::now();
        let mut task = sample_task(Status::Pending);
        let patch = TaskPatch {
            title: Some("renamed".into()),
            status: Some(Status::Completed),
            ..TaskPatch::default()
        };
        patch.apply(&mut task, now).unwrap();
        assert_eq!(task.title, "renamed");
        assert_eq!(task.status, Status::Completed);
        assert_eq!(task.completed_at, Some(now));
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
