use crate::channels::{DEFAULT_GREETING, VIEW2_MESSAGE};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Channel the sender publishes on and the receiver observes.
    pub channel: String,
    pub sender: SenderConfig,
    pub log: LogConfig,
}

/// Sender screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Prefix of the default payload, followed by `" at {timestamp}"`.
    pub greeting: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    /// Write file logs as JSON lines.
    pub json: bool,
    /// Directory for rolling log files. Console only when unset.
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel: VIEW2_MESSAGE.to_owned(),
            sender: SenderConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self { greeting: DEFAULT_GREETING.to_owned() }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, path: None }
    }
}
