//! Logging setup for the `codegauge` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is not set.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins over the verbosity count. Safe to call more than once;
/// later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_line_number(verbosity >= 3)
        .try_init()
        .is_ok();

    if installed {
        debug!("codegauge started with verbosity level: {}", verbosity);
    }
}
