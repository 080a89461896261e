//! Read-only projections over the stored collection: filters, display
//! order, and summary counts.
//!
//! All of these recompute urgency from `now`; the stored `priority` field
//! is never trusted for display.

use chrono::{DateTime, Duration, Utc};

use crate::task::{Status, Task};

/// Display filters offered by the list surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    /// Everything.
    All,
    /// Not completed.
    Pending,
    /// Completed only.
    Completed,
    /// Not completed and due (or overdue) within 24 hours.
    Urgent,
    /// Not completed and due within the current UTC day.
    Today,
}

/// Summary counts for the stats header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    /// Active tasks due (or overdue) within 24 hours.
    pub urgent: usize,
    /// Active tasks due within the current UTC day.
    pub due_today: usize,
    /// Tasks not yet completed.
    pub active: usize,
    /// Completed tasks.
    pub completed: usize,
}

/// Applies a filter, returning references in input order.
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: TaskFilter, now: DateTime<Utc>) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            TaskFilter::All => true,
            TaskFilter::Pending => task.status != Status::Completed,
            TaskFilter::Completed => task.status == Status::Completed,
            TaskFilter::Urgent => task.status != Status::Completed && within_24h(task, now),
            TaskFilter::Today => task.status != Status::Completed && due_today(task, now),
        })
        .collect()
}

/// Sorts for display: active tasks before completed, closest deadline
/// first within each group.
pub fn sort_for_display(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| {
        let a_done = a.status == Status::Completed;
        let b_done = b.status == Status::Completed;
        a_done.cmp(&b_done).then(a.deadline.cmp(&b.deadline))
    });
}

/// Computes the summary counts in one pass with one consistent `now`.
#[must_use]
pub fn stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let mut out = TaskStats::default();
    for task in tasks {
        if task.status == Status::Completed {
            out.completed += 1;
            continue;
        }
        out.active += 1;
        if within_24h(task, now) {
            out.urgent += 1;
        }
        if due_today(task, now) {
            out.due_today += 1;
        }
    }
    out
}

fn within_24h(task: &Task, now: DateTime<Utc>) -> bool {
    task.deadline.signed_duration_since(now) < Duration::hours(24)
}

fn due_today(task: &Task, now: DateTime<Utc>) -> bool {
    task.deadline.date_naive() == now.date_naive()
}
