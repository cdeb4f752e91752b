//! graphsearch - BFS, DFS, components, diameter and Dijkstra on edge list files

mod cli;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use clap::error::ErrorKind;

use cli::Cli;
use graphsearch::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            // Help and version are informational, not errors
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                return ExitCode::FAILURE;
            }
        },
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("warning: failed to initialize logging: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match cli::run(&cli) {
        Ok(()) => {
            tracing::debug!(elapsed = ?start.elapsed(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
