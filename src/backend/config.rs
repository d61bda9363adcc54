//! Engine configuration.
//!
//! Loaded from TOML, every field optional:
//!
//! ```toml
//! [space]
//! head_index = true
//! expected_atoms = 10000
//!
//! [logging]
//! level = "debug"
//! ansi = false
//! ```
//!
//! Environment variables override the file:
//! - `METTASPACE_HEAD_INDEX` - `true`/`false`
//! - `METTASPACE_EXPECTED_ATOMS` - positive integer
//! - `METTASPACE_LOG` - `error`, `warn`, `info`, `debug` or `trace`
//! - `METTASPACE_LOG_ANSI` - `true`/`false`
//!
//! Values that do not parse are ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{warn, Level};

const DEFAULT_EXPECTED_ATOMS: usize = 1024;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub space: SpaceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for `GroundingSpace::with_config`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Keep a (head, arity) bloom filter to skip scans for absent heads
    pub head_index: bool,

    /// Sizing hint for the head index
    pub expected_atoms: usize,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            head_index: false,
            expected_atoms: DEFAULT_EXPECTED_ATOMS,
        }
    }
}

/// Settings for `init_logging`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level, as accepted by `tracing::Level::from_str`
    pub level: String,

    /// Colored output
    pub ansi: bool,

    /// Print the event target (`mettaspace::space::query`, ...)
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            ansi: true,
            target: true,
        }
    }
}

impl LoggingConfig {
    /// Configured level, `WARN` if it does not parse
    pub fn max_level(&self) -> Level {
        self.level.parse().unwrap_or_else(|_| {
            warn!(target: "mettaspace::config", level = %self.level, "Unknown log level, using warn");
            Level::WARN
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?.with_env_overrides())
    }

    /// Apply `METTASPACE_*` environment variables
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("METTASPACE_HEAD_INDEX").and_then(|s| parse_bool(&s)) {
            self.space.head_index = v;
        }
        if let Some(n) = lookup("METTASPACE_EXPECTED_ATOMS")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.space.expected_atoms = n;
        }
        if let Some(level) = lookup("METTASPACE_LOG").filter(|s| s.trim().parse::<Level>().is_ok()) {
            self.logging.level = level.trim().to_string();
        }
        if let Some(v) = lookup("METTASPACE_LOG_ANSI").and_then(|s| parse_bool(&s)) {
            self.logging.ansi = v;
        }
        self
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
