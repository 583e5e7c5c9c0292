//! Log levels and per-request logger settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::LoggingSettings;

/// Severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// How a [`JobLogger`](super::JobLogger) filters and formats lines.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Lines below this level are dropped.
    pub level: LogLevel,
    /// Keep encoder output out of the log unless a command fails.
    pub compact: bool,
    /// Encoder lines kept for the failure tail.
    pub error_tail: usize,
    /// Prefix lines with `[HH:MM:SS]`.
    pub show_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_settings(&LoggingSettings::default())
    }
}

impl LogConfig {
    /// Everything down to debug, encoder output inline, longer tail.
    pub fn verbose() -> Self {
        Self {
            level: LogLevel::Debug,
            compact: false,
            error_tail: 50,
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level,
            compact: settings.compact,
            error_tail: settings.error_tail as usize,
            show_timestamps: settings.show_timestamps,
        }
    }
}

/// Receives every formatted line, e.g. to echo it on a console.
pub type LogCallback = Box<dyn Fn(&str) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_settings_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.compact);
        assert_eq!(config.error_tail, 20);
    }

    #[test]
    fn verbose_shows_encoder_output() {
        let config = LogConfig::verbose();
        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.compact);
    }

    #[test]
    fn config_follows_settings() {
        let settings = LoggingSettings {
            level: LogLevel::Warn,
            compact: false,
            error_tail: 7,
            show_timestamps: false,
            log_to_file: true,
        };
        let config = LogConfig::from_settings(&settings);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.error_tail, 7);
        assert!(!config.show_timestamps);
    }

    #[test]
    fn levels_order_and_render() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        let parsed: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, LogLevel::Error);
    }
}
