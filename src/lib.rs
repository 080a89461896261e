//! Core library for the `radar` CLI: deadline detection in free-form page
//! text, task persistence, and alerting.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod context;
pub mod detect;
pub mod error;
pub mod ports;
pub mod task;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    dotenvy::dotenv().ok();
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
