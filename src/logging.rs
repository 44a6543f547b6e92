//! Tracing/logging initialization.
//!
//! Logs go to stderr so that stdout stays clean for JSON and CSV output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (falls back to `RUST_LOG`)
pub const LOG_ENV: &str = "SPLITBOOK_LOG";

/// Default filter for a given number of `-v` flags
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the process.
///
/// An explicit `SPLITBOOK_LOG` or `RUST_LOG` filter wins over the verbosity
/// flags. Safe to call multiple times (subsequent calls are no-ops).
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
