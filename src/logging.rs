//! Diagnostics for the `bf` binary.
//!
//! Program output owns stdout byte for byte, so log lines always go to stderr.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the level for this
/// crate: 0 is `warn`, 1 is `debug`, 2 or more is `trace` (one event per
/// executed instruction).
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,bf_interp=debug",
        _ => "warn,bf_interp=trace",
    }
}
