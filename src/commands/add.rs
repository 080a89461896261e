//! `add` — manual task entry.

use crate::context::ServiceContext;
use crate::detect::dates;
use crate::task::reconcile::{reconcile, DuplicateMode, ReconcileOutcome};
use crate::task::{Priority, Status, Task};

/// Adds a task by hand. The deadline text goes through the same
/// normalizer the detector uses, so relative phrases work here too.
///
/// # Errors
///
/// Returns an error string when the deadline text cannot be resolved or
/// the store fails.
pub fn run(
    ctx: &ServiceContext,
    title: &str,
    deadline: &str,
    description: &str,
    tags: &[String],
) -> Result<(), String> {
    let now = ctx.clock.now();
    let date = dates::normalize(deadline, None, deadline, now)
        .ok_or_else(|| format!("could not understand deadline: {deadline}"))?;

    let task = Task {
        id: ctx.id_gen.generate_id(),
        title: title.to_string(),
        description: description.to_string(),
        deadline: date.timestamp,
        priority: Priority::classify(date.timestamp, now),
        status: Status::Pending,
        tags: tags.iter().map(|t| t.to_lowercase()).collect(),
        source_url: None,
        context: String::new(),
        detected_at: now,
        created_at: now,
        completed_at: None,
    };

    match reconcile(ctx.store.as_ref(), &task, DuplicateMode::PageLocal)
        .map_err(|e| e.to_string())?
    {
        ReconcileOutcome::Inserted { id } => {
            println!("Added {id}: {title} due {}", date.timestamp.to_rfc3339());
        }
        ReconcileOutcome::Duplicate { existing_id } => {
            println!("Already tracked as {existing_id}");
        }
    }
    Ok(())
}
