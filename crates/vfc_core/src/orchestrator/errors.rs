//! Error types for the conversion pipeline.
//!
//! Errors carry context that chains through layers:
//! Request → Step → Tool → Detail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tools::ToolError;

/// Broad classification used by front ends (e.g. CLI exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is unusable (missing source, bad quality, ...).
    InputValidation,
    /// Output location settings are missing.
    Configuration,
    /// The encoder or prober failed.
    ExternalProcess,
    /// Local filesystem failure.
    Io,
}

/// Top-level conversion error.
#[derive(Error, Debug)]
pub enum TranscodeError {
    /// The request failed validation before anything ran.
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// Output directory or filename not configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to prepare the output directory.
    #[error("Conversion '{job_name}' setup failed for {}: {source}", .path.display())]
    SetupFailed {
        job_name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A pipeline step failed.
    #[error("Conversion '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },
}

impl TranscodeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn setup_failed(
        job_name: impl Into<String>,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            path: path.into(),
            source,
        }
    }

    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::InvalidInput(_) => ErrorKind::InputValidation,
            TranscodeError::Configuration(_) => ErrorKind::Configuration,
            TranscodeError::SetupFailed { .. } => ErrorKind::Io,
            TranscodeError::StepFailed { source, .. } => source.kind(),
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug)]
pub enum StepError {
    /// An external command exited non-zero. `message` is its stderr.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
        command_line: String,
    },

    /// The external program could not be started.
    #[error("{tool} could not be started: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The prober could not read a file.
    #[error("Probe of {} failed: {message}", .path.display())]
    ProbeFailed { path: PathBuf, message: String },

    /// Input for the step is unusable.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// The step ran but its output is missing or unusable.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),
}

impl StepError {
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
        command_line: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
            command_line: command_line.into(),
        }
    }

    pub fn probe_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StepError::InvalidInput(_) => ErrorKind::InputValidation,
            StepError::CommandFailed { .. }
            | StepError::ToolUnavailable { .. }
            | StepError::ProbeFailed { .. }
            | StepError::InvalidOutput(_) => ErrorKind::ExternalProcess,
        }
    }
}

impl From<ToolError> for StepError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::SpawnFailed { tool, source } => StepError::ToolUnavailable { tool, source },
            ToolError::OpenFailed { path, message } | ToolError::ParseFailed { path, message } => {
                StepError::ProbeFailed { path, message }
            }
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for conversions.
pub type TranscodeResult<T> = Result<T, TranscodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_displays_stderr() {
        let err = StepError::command_failed(
            "ffmpeg",
            1,
            "Unknown encoder 'libfoo'",
            "ffmpeg -i a.mov -y b.mp4",
        );
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Unknown encoder 'libfoo'"));
    }

    #[test]
    fn step_failure_chains_context() {
        let step_err = StepError::probe_failed("/tmp/out.mp4", "cannot open");
        let err = TranscodeError::step_failed("clip", "Probe output", step_err);

        let msg = err.to_string();
        assert!(msg.contains("clip"));
        assert!(msg.contains("Probe output"));
        assert!(msg.contains("cannot open"));
        assert_eq!(err.kind(), ErrorKind::ExternalProcess);
    }

    #[test]
    fn kinds_classify() {
        assert_eq!(
            TranscodeError::invalid_input("x").kind(),
            ErrorKind::InputValidation
        );
        assert_eq!(
            TranscodeError::configuration("x").kind(),
            ErrorKind::Configuration
        );
        let source_probe = TranscodeError::step_failed(
            "clip",
            "Probe source",
            StepError::invalid_input("could not be loaded"),
        );
        assert_eq!(source_probe.kind(), ErrorKind::InputValidation);
        let setup = TranscodeError::setup_failed(
            "clip",
            "/out",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(setup.kind(), ErrorKind::Io);
    }

    #[test]
    fn tool_errors_convert() {
        let spawn = ToolError::SpawnFailed {
            tool: "ffmpeg".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(matches!(
            StepError::from(spawn),
            StepError::ToolUnavailable { .. }
        ));
        let open = ToolError::open_failed("/x.mp4", "no such file");
        assert!(matches!(
            StepError::from(open),
            StepError::ProbeFailed { .. }
        ));
    }

    #[test]
    fn unreadable_probe_output_names_the_file() {
        let parse = ToolError::parse_failed("/renders/clip_0000.mp4", "expected value");
        let err = StepError::from(parse);

        let msg = err.to_string();
        assert!(msg.contains("/renders/clip_0000.mp4"), "{}", msg);
        assert!(msg.contains("expected value"));
        assert_eq!(err.kind(), ErrorKind::ExternalProcess);
    }
}
