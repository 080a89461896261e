//! Binary entrypoint for the `radar` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match deadline_radar::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
