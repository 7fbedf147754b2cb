//! Log level plumbing between the manifest and `tracing`.

use roster_yaml::LogLevel;
use tracing::Level;

/// The `tracing` level for a manifest log level.
pub const fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}
