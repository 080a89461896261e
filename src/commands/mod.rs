//! Command dispatch and handlers.

pub mod add;
pub mod alerts;
pub mod complete;
pub mod delete;
pub mod list;
pub mod scan;

use std::env;
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;

/// Default store file, relative to the working directory.
const DEFAULT_STORE: &str = "radar-tasks.json";

/// Dispatch a parsed command to its handler.
///
/// The store location resolves in order: `--store` flag, `RADAR_STORE`
/// environment variable, then [`DEFAULT_STORE`].
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let ctx = ServiceContext::live(resolve_store_path(cli.store.clone()));
    dispatch_with_context(&cli.command, &ctx)
}

/// Dispatch a command with the given service context.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Scan { file, url, page_title, save } => {
            scan::run(ctx, file, url.clone(), page_title.clone(), *save)
        }
        Command::List { filter } => list::run(ctx, filter.to_filter()),
        Command::Add { title, deadline, description, tags } => {
            add::run(ctx, title, deadline, description, tags)
        }
        Command::Complete { id } => complete::run(ctx, id),
        Command::Delete { id } => delete::run(ctx, id),
        Command::Alerts => alerts::run(ctx),
    }
}

fn resolve_store_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| env::var("RADAR_STORE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE))
}
