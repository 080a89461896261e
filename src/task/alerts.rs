//! Alert sweeps — digest and last-call notification planning.
//!
//! Planning is pure (tasks + `now` in, notifications out); delivery goes
//! through the [`AlertSink`] port and is fire-and-forget. Sweeps only read
//! the store; they never mutate task fields.

use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::ports::alerts::{AlertSink, Urgency};
use crate::task::{Status, Task};

/// A notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAlert {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
    /// Delivery prominence.
    pub urgency: Urgency,
}

/// Plans the digest: one summary of everything due within seven days.
///
/// Completed tasks are excluded. Returns `None` when nothing qualifies.
#[must_use]
pub fn plan_digest(tasks: &[Task], now: DateTime<Utc>) -> Option<PlannedAlert> {
    let upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status != Status::Completed)
        .filter(|t| t.deadline.signed_duration_since(now) < Duration::days(7))
        .collect();
    if upcoming.is_empty() {
        return None;
    }
    let message = upcoming
        .iter()
        .map(|t| format!("{}: {}", t.title, t.deadline.to_rfc3339()))
        .collect::<Vec<_>>()
        .join("\n");
    Some(PlannedAlert { title: "Upcoming Deadlines".into(), message, urgency: Urgency::Normal })
}

/// Plans last-call alerts: one per task due within 24 hours.
///
/// Completed tasks are excluded.
#[must_use]
pub fn plan_last_call(tasks: &[Task], now: DateTime<Utc>) -> Vec<PlannedAlert> {
    tasks
        .iter()
        .filter(|t| t.status != Status::Completed)
        .filter(|t| t.deadline.signed_duration_since(now) < Duration::hours(24))
        .map(|t| PlannedAlert {
            title: "Last Call!".into(),
            message: format!("{} is due in less than 24 hours!", t.title),
            urgency: Urgency::High,
        })
        .collect()
}

/// Runs both sweeps against the sink.
///
/// Delivery failures are logged and skipped — an unreachable sink never
/// aborts the sweep. Returns the number of notifications delivered.
pub fn run_sweeps(tasks: &[Task], now: DateTime<Utc>, sink: &dyn AlertSink) -> usize {
    let mut planned = Vec::new();
    planned.extend(plan_digest(tasks, now));
    planned.extend(plan_last_call(tasks, now));

    let mut delivered = 0;
    for alert in planned {
        match sink.notify(&alert.title, &alert.message, alert.urgency) {
            Ok(()) => delivered += 1,
            Err(e) => warn!("alert delivery failed: {e}"),
        }
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordingAlertSink;
    use crate::error::AlertError;
    use crate::task::Priority;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn task(title: &str, deadline: DateTime<Utc>, status: Status) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        Task {
            id: title.to_lowercase(),
            title: title.into(),
            description: String::new(),
            deadline,
            priority: Priority::Medium,
            status,
            tags: BTreeSet::new(),
            source_url: None,
            context: String::new(),
            detected_at: now,
            created_at: now,
            completed_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn digest_collects_tasks_due_within_a_week() {
        let tasks = vec![
            task("Soon", now() + Duration::days(2), Status::Pending),
            task("Later", now() + Duration::days(30), Status::Pending),
        ];
        let digest = plan_digest(&tasks, now()).unwrap();
        assert!(digest.message.contains("Soon"));
        assert!(!digest.message.contains("Later"));
        assert_eq!(digest.urgency, Urgency::Normal);
    }

    #[test]
    fn digest_is_none_when_nothing_is_due() {
        let tasks = vec![task("Later", now() + Duration::days(30), Status::Pending)];
        assert!(plan_digest(&tasks, now()).is_none());
    }

    #[test]
    fn last_call_fires_per_task_under_24_hours() {
        let tasks = vec![
            task("Tonight", now() + Duration::hours(10), Status::Pending),
            task("Tomorrow night", now() + Duration::hours(30), Status::Pending),
        ];
        let alerts = plan_last_call(&tasks, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message, "Tonight is due in less than 24 hours!");
        assert_eq!(alerts[0].urgency, Urgency::High);
    }

    #[test]
    fn completed_tasks_never_alert() {
        // A completed task with a past deadline stays silent in both sweeps.
        let tasks = vec![task("Done", now() - Duration::days(1), Status::Completed)];
        assert!(plan_digest(&tasks, now()).is_none());
        assert!(plan_last_call(&tasks, now()).is_empty());
    }

    #[test]
    fn sweeps_deliver_through_the_sink() {
        let sink = RecordingAlertSink::new();
        let tasks = vec![task("Tonight", now() + Duration::hours(10), Status::Pending)];
        let delivered = run_sweeps(&tasks, now(), &sink);
        // One digest plus one last call.
        assert_eq!(delivered, 2);
        assert_eq!(sink.sent().len(), 2);
    }

    #[test]
    fn sink_failure_does_not_abort_the_sweep() {
        struct DeadSink;
        impl AlertSink for DeadSink {
            fn notify(&self, _: &str, _: &str, _: Urgency) -> Result<(), AlertError> {
                Err(AlertError::Unavailable("no channel".into()))
            }
        }
        let tasks = vec![task("Tonight", now() + Duration::hours(10), Status::Pending)];
        assert_eq!(run_sweeps(&tasks, now(), &DeadSink), 0);
    }
}
