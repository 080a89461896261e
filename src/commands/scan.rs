//! `scan` — run the detection pipeline over a text file.

use std::path::Path;

use crate::adapters::live::PlainTextPage;
use crate::context::ServiceContext;
use crate::detect::{DetectionRequest, Scanner};
use crate::task::reconcile::{reconcile_batch, DuplicateMode, ReconcileOutcome};

/// Scans `file` and prints the detected tasks; with `save`, merges them
/// into the store afterwards.
///
/// Detection output is printed before the store is touched, so a
/// persistence failure never hides what was found.
///
/// # Errors
///
/// Returns an error string when the file cannot be read or, with `save`,
/// when the store fails.
pub fn run(
    ctx: &ServiceContext,
    file: &Path,
    url: Option<String>,
    page_title: Option<String>,
    save: bool,
) -> Result<(), String> {
    let page = PlainTextPage::from_file(file, url, page_title)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let scanner = Scanner::new();
    let now = ctx.clock.now();
    let batch = scanner
        .handle(DetectionRequest::DetectNow, &page, now, ctx.id_gen.as_ref())
        .ok_or_else(|| "detection produced no result".to_string())?;

    if batch.tasks.is_empty() {
        println!("No deadlines found in {}", batch.page_title);
        return Ok(());
    }

    println!("Detected {} task(s) in {}:", batch.tasks.len(), batch.page_title);
    for task in &batch.tasks {
        println!(
            "  {} [{}] due {}  {}",
            task.id,
            task.current_priority(now).label(),
            task.deadline.to_rfc3339(),
            task.title
        );
    }

    if save {
        let outcomes = reconcile_batch(ctx.store.as_ref(), &batch.tasks, DuplicateMode::CrossPage)
            .map_err(|e| e.to_string())?;
        let inserted =
            outcomes.iter().filter(|o| matches!(o, ReconcileOutcome::Inserted { .. })).count();
        let duplicates = outcomes.len() - inserted;
        println!("Saved {inserted} task(s), discarded {duplicates} duplicate(s)");
    }

    Ok(())
}
