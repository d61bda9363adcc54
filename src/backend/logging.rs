//! Log output for programs embedding the engine.
//!
//! The engine only emits `tracing` events (targets `mettaspace::<module>::<op>`).
//! Embedders that have no subscriber of their own can install the stock
//! formatter here.

use std::fmt;

use crate::backend::config::LoggingConfig;

#[derive(Debug)]
pub struct LoggingError(String);

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to install log subscriber: {}", self.0)
    }
}

impl std::error::Error for LoggingError {}

/// Install a global `tracing-subscriber` formatter writing to stderr.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_max_level(config.max_level())
        .with_ansi(config.ansi)
        .with_target(config.target)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError(e.to_string()))
}
