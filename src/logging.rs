//! Process-wide logging setup

use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;

/// Install the global `tracing` subscriber at `level`.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is left in place. Output lines carry timestamp, target, level and message.
pub fn init(level: LogLevel) -> bool {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.as_tracing_level()).into())
        .parse_lossy("");

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized at {}", level);
    }

    installed
}
