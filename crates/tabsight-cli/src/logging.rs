// Diagnostic logging setup

use tracing::Level;
use tracing_subscriber::fmt;

use crate::error::{CliError, CliResult};

/// Parse a level name, case-insensitively
pub fn parse_level(level: &str) -> CliResult<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(CliError::invalid_argument(format!(
            "unknown log level '{}'",
            other
        ))),
    }
}

/// Install the global subscriber. Diagnostics go to stderr so that stdout
/// carries only answers.
pub fn init_logging(level: &str) -> CliResult<()> {
    let level = parse_level(level)?;
    fmt()
        .with_max_level(level)
        .with_target(level >= Level::DEBUG)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
