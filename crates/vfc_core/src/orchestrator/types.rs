//! Core types for the conversion pipeline.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::logging::JobLogger;
use crate::models::{TranscodeRequest, VideoInfo, VideoMetadata};
use crate::tools::MediaTools;

/// Output filename reported when the master toggle is off.
pub const DISABLED_OUTPUT: &str = "Output disabled";

/// Policy knobs that come from settings rather than the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Backend passed to `-hwaccel` when the request enables acceleration.
    pub hwaccel_backend: String,
    /// Reject codec/container pairs outside the whitelist.
    pub strict_codec_check: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            hwaccel_backend: "opencl".to_string(),
            strict_codec_check: false,
        }
    }
}

impl ProcessOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hwaccel_backend: settings.tools.hwaccel_backend.clone(),
            strict_codec_check: settings.encode.strict_codec_check,
        }
    }
}

/// Read-only context passed to pipeline steps.
pub struct Context<'a> {
    /// The validated request.
    pub request: &'a TranscodeRequest,
    /// Encoder/prober boundary.
    pub tools: &'a dyn MediaTools,
    /// Per-request logger.
    pub logger: &'a JobLogger,
    pub options: &'a ProcessOptions,
    /// Name used in error context.
    pub job_name: String,
    /// Source video, separators normalized.
    pub source: PathBuf,
    /// Resolved, not yet existing, output file.
    pub output_path: PathBuf,
}

impl Context<'_> {
    /// Program name for encoder invocations.
    pub fn encoder(&self) -> &str {
        self.tools.encoder_program()
    }
}

/// The primary encode as it was run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeRecord {
    pub command_line: String,
    pub bitrate_kbps: u32,
}

/// Mutable state that accumulates results from pipeline steps.
#[derive(Debug, Clone, Default)]
pub struct JobState {
    /// Source measurements (from Probe source).
    pub source: Option<VideoMetadata>,
    /// Source bitrate in kbps. Logged only.
    pub source_bitrate_kbps: Option<f64>,
    /// Primary encode (from Transcode).
    pub transcode: Option<TranscodeRecord>,
    pub original_audio_path: Option<PathBuf>,
    pub silent_audio_path: Option<PathBuf>,
    /// Produced-file measurements (from Probe output).
    pub loaded: Option<VideoMetadata>,
}

impl JobState {
    /// Source duration in seconds, 0 if the source was not probed.
    pub fn source_duration(&self) -> f64 {
        self.source.map(|m| m.duration).unwrap_or(0.0)
    }
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (not requested, not an error).
    Skipped(String),
}

/// Everything a completed conversion produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeOutput {
    pub output_path: PathBuf,
    pub video_info: VideoInfo,
    pub original_audio_path: Option<PathBuf>,
    pub silent_audio_path: Option<PathBuf>,
    /// The executed transcode command line.
    pub command_line: String,
    pub bitrate_kbps: u32,
}

/// Result of `process_video`.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscodeOutcome {
    /// The master toggle was off; nothing ran.
    Disabled,
    Completed(TranscodeOutput),
}

impl TranscodeOutcome {
    pub fn is_disabled(&self) -> bool {
        matches!(self, TranscodeOutcome::Disabled)
    }

    pub fn output(&self) -> Option<&TranscodeOutput> {
        match self {
            TranscodeOutcome::Completed(output) => Some(output),
            TranscodeOutcome::Disabled => None,
        }
    }

    /// The fixed four-value result handed back to the host.
    pub fn to_node_output(&self) -> NodeOutput {
        match self {
            TranscodeOutcome::Disabled => NodeOutput {
                output_filename: DISABLED_OUTPUT.to_string(),
                video_info: Map::new(),
                original_audio_path: None,
                silent_audio_path: None,
            },
            TranscodeOutcome::Completed(output) => NodeOutput {
                output_filename: path_string(&output.output_path),
                video_info: output.video_info.to_map(),
                original_audio_path: output.original_audio_path.as_deref().map(path_string),
                silent_audio_path: output.silent_audio_path.as_deref().map(path_string),
            },
        }
    }
}

/// Host-facing result: `(output_filename, video_info, original_audio_path,
/// silent_audio_path)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeOutput {
    pub output_filename: String,
    pub video_info: Map<String, Value>,
    pub original_audio_path: Option<String>,
    pub silent_audio_path: Option<String>,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
