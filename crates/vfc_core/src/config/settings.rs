//! Application settings, one TOML table per section.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// External program locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Encoding policy.
    #[serde(default)]
    pub encode: EncodeSettings,
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder used by the CLI when a request has none.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for per-request log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output_folder() -> String {
    "converted".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the application log.
    #[serde(default)]
    pub level: LogLevel,

    /// Use compact log format (encoder output only shown on failure).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of encoder stderr lines to show on failure.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Prefix job log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Write a per-request log file to the logs folder.
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
            log_to_file: true,
        }
    }
}

/// External program configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Encoder program (name on PATH or absolute path).
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// Prober program.
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    /// Backend passed to `-hwaccel` when acceleration is enabled.
    #[serde(default = "default_hwaccel_backend")]
    pub hwaccel_backend: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_hwaccel_backend() -> String {
    "opencl".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
            hwaccel_backend: default_hwaccel_backend(),
        }
    }
}

/// Encoding policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Reject codec/container pairs outside the known whitelist instead of
    /// leaving the decision to the encoder.
    #[serde(default)]
    pub strict_codec_check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[tools]"));
        assert!(toml.contains("hwaccel_backend"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.tools.ffmpeg, settings.tools.ffmpeg);
        assert_eq!(parsed.logging.level, settings.logging.level);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[tools]\nffmpeg = \"/opt/ffmpeg/bin/ffmpeg\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.tools.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        // Defaults applied for missing
        assert_eq!(parsed.tools.ffprobe, "ffprobe");
        assert_eq!(parsed.tools.hwaccel_backend, "opencl");
        assert!(!parsed.encode.strict_codec_check);
        assert_eq!(parsed.logging.error_tail, 20);
    }
}
