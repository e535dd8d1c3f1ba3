//! Tracing subscriber setup for the `shuddho` binary.
//!
//! Events go to stderr so corrected text on stdout stays pipeable.
//! `RUST_LOG` wins over the verbosity flags when it is set.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Level for `-q` / `-v` counts: quiet is errors only, default warnings,
/// then info, debug and trace.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: u8, quiet: bool, color: bool) {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shuddho={}", level)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(verbose >= 2)
        .compact();

    if tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(%level, "logging initialized");
    }
}
