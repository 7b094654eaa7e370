//! Log output for the command-line front end.
//!
//! The library crates log through the `log` facade; the subscriber's log
//! bridge forwards those records here.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` applies
/// (`info`, or `debug` with `--verbose`). Output goes to stderr so
/// that JSON on stdout stays clean.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}
