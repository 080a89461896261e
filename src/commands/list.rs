//! `list` — show stored tasks with live urgency.

use crate::context::ServiceContext;
use crate::ports::store::get_all;
use crate::task::query::{filter_tasks, sort_for_display, stats, TaskFilter};
use crate::task::Status;

/// Lists stored tasks under the given filter.
///
/// # Errors
///
/// Returns an error string when the store cannot be read.
pub fn run(ctx: &ServiceContext, filter: TaskFilter) -> Result<(), String> {
    let tasks = get_all(ctx.store.as_ref()).map_err(|e| e.to_string())?;
    let now = ctx.clock.now();

    let summary = stats(&tasks, now);
    println!(
        "{} active, {} completed, {} urgent, {} due today",
        summary.active, summary.completed, summary.urgent, summary.due_today
    );

    let mut shown = filter_tasks(&tasks, filter, now);
    sort_for_display(&mut shown);
    for task in shown {
        let marker = if task.status == Status::Completed { "x" } else { " " };
        println!(
            "[{marker}] {} [{}] due {}  {}",
            task.id,
            task.current_priority(now).label(),
            task.deadline.to_rfc3339(),
            task.title
        );
    }
    Ok(())
}
