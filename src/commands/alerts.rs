//! `alerts` — run the digest and last-call sweeps once.

use crate::context::ServiceContext;
use crate::ports::store::get_all;
use crate::task::alerts::run_sweeps;

/// Runs both alert sweeps over the stored tasks.
///
/// # Errors
///
/// Returns an error string when the store cannot be read. Individual
/// delivery failures are logged, not surfaced.
pub fn run(ctx: &ServiceContext) -> Result<(), String> {
    let tasks = get_all(ctx.store.as_ref()).map_err(|e| e.to_string())?;
    let delivered = run_sweeps(&tasks, ctx.clock.now(), ctx.alerts.as_ref());
    println!("Delivered {delivered} alert(s)");
    Ok(())
}
