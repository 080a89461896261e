//! `complete` — mark a task done.

use crate::context::ServiceContext;
use crate::ports::store::update;
use crate::task::{Status, TaskPatch};

/// Marks the task with the given id completed.
///
/// # Errors
///
/// Returns an error string when the id is unknown, the task is already
/// completed, or the store fails.
pub fn run(ctx: &ServiceContext, id: &str) -> Result<(), String> {
    let patch = TaskPatch { status: Some(Status::Completed), ..TaskPatch::default() };
    let task =
        update(ctx.store.as_ref(), id, &patch, ctx.clock.now()).map_err(|e| e.to_string())?;
    println!("Completed {}: {}", task.id, task.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixedClock, MemoryTaskStore, RecordingAlertSink, SeqIdGenerator};
    use crate::ports::store::get_all;
    use crate::task::{Priority, Task};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn test_ctx() -> ServiceContext {
        ServiceContext {
            clock: Box::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap())),
            id_gen: Box::new(SeqIdGenerator::new()),
            store: Box::new(MemoryTaskStore::new()),
            alerts: Box::new(RecordingAlertSink::new()),
        }
    }

    fn seed(ctx: &ServiceContext, id: &str) {
        let now = ctx.clock.now();
        let task = Task {
            id: id.into(),
            title: "Essay".into(),
            description: String::new(),
            deadline: now + chrono::Duration::days(3),
            priority: Priority::High,
            status: Status::Pending,
            tags: BTreeSet::new(),
            source_url: None,
            context: String::new(),
            detected_at: now,
            created_at: now,
            completed_at: None,
        };
        crate::ports::store::put(ctx.store.as_ref(), task).unwrap();
    }

    #[test]
    fn completes_a_pending_task() {
        let ctx = test_ctx();
        seed(&ctx, "a");
        run(&ctx, "a").unwrap();
        let tasks = get_all(ctx.store.as_ref()).unwrap();
        assert_eq!(tasks[0].status, Status::Completed);
        assert!(tasks[0].completed_at.is_some());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let ctx = test_ctx();
        assert!(run(&ctx, "nope").is_err());
    }
}
