//! `delete` — remove a task from the store.

use crate::context::ServiceContext;
use crate::ports::store::delete;

/// Deletes the task with the given id.
///
/// # Errors
///
/// Returns an error string when the id is unknown or the store fails.
pub fn run(ctx: &ServiceContext, id: &str) -> Result<(), String> {
    delete(ctx.store.as_ref(), id).map_err(|e| e.to_string())?;
    println!("Deleted {id}");
    Ok(())
}
