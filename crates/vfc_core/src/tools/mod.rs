//! Boundary to the external encoder and prober.
//!
//! Orchestration only talks to [`MediaTools`], so it can be exercised with
//! a scripted fake instead of a real ffmpeg install:
//!
//! - `run` executes a command and returns its exit code and captured text.
//!   A non-zero exit is *not* an error at this level; the caller decides.
//! - `probe` opens a video and reads its numeric properties. Failing to
//!   open is [`ToolError::OpenFailed`], distinct from a probe of zeros.

mod command;
#[cfg(test)]
pub(crate) mod fake;
mod probe;
mod system;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::VideoProbe;

pub use command::{CommandOutput, ToolCommand};
pub use probe::parse_ffprobe_json;
pub use system::SystemTools;

/// Errors at the process boundary.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be started.
    #[error("Failed to run {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The prober could not open the file.
    #[error("{path} could not be opened: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// The prober ran but its output for `path` could not be read.
    #[error("Failed to parse probe output for {}: {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },
}

impl ToolError {
    pub fn open_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OpenFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Capability interface over the encoder and the prober.
pub trait MediaTools {
    /// Program name used for the encoder (first token of built commands).
    fn encoder_program(&self) -> &str;

    /// Run a command to completion, capturing stdout/stderr.
    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput>;

    /// Read numeric video properties from a file.
    fn probe(&self, path: &Path) -> ToolResult<VideoProbe>;
}
