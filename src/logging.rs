//! Logging setup for the CLI using `tracing-subscriber`.
//!
//! Events go to stderr so summaries on stdout stay machine-readable.
//! `RUST_LOG` takes precedence over the verbosity flags when set.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map `-v` count and `--quiet` to a level.
///
/// - `--quiet`: error
/// - 0: warn
/// - 1 (`-v`): info
/// - 2 (`-vv`): debug
/// - 3+ (`-vvv`): trace
pub fn level_from_flags(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "csv_cleanse={}",
            level.as_str().to_ascii_lowercase()
        ))
    })
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(level: Level) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A second init (e.g. in tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init();
}
