//! Structured logging setup for the `graphsearch` binary.
//!
//! The library only emits `tracing` events; nothing is printed unless a subscriber
//! is installed with [`init_tracing`].

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the command line log level
pub const LOG_ENV: &str = "GRAPHSEARCH_LOG";

/// Logs the elapsed time since `$start` at trace level.
///
/// ```rust,ignore
/// let start = Instant::now();
/// let graph: AdjArrayUndir = data.build();
/// trace_time!(start, "build_graph", nodes = graph.number_of_nodes());
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize logging to stderr based on CLI arguments.
///
/// `--log-level` wins over `--verbose`; both lose against [`LOG_ENV`] or `RUST_LOG`.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level,
        (true, None) => "debug",
        (false, None) => "warn",
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Plain levels apply to this crate only; full directives are passed through
fn directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("graphsearch={level}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives() {
        assert_eq!(directive("debug"), "graphsearch=debug");
        assert_eq!(directive("graphsearch=trace"), "graphsearch=trace");
        assert_eq!(directive("warn,graphsearch=info"), "warn,graphsearch=info");
    }
}
