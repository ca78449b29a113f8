//! Logging initialization

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Initialize logging based on the debug flag and `RUST_LOG`
///
/// Silent unless `--debug` is passed or `RUST_LOG` is set. Output goes to
/// stderr so stdout only carries command results. Returns true if a
/// subscriber was installed.
pub fn init_logging(debug: bool) -> bool {
    let filter = match (EnvFilter::try_from_default_env(), debug) {
        (Ok(filter), _) => filter,
        (Err(_), true) => EnvFilter::new("debug"),
        // No logging by default (silent operation)
        (Err(_), false) => return false,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_file(debug)
        .with_line_number(debug)
        .try_init()
        .is_ok()
}
