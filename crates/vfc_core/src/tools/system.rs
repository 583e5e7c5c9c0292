//! `MediaTools` backed by real ffmpeg/ffprobe processes.

use std::path::Path;
use std::process::{Command, Stdio};

use super::probe::{parse_ffprobe_json, FFPROBE_ARGS};
use super::{CommandOutput, MediaTools, ToolCommand, ToolError, ToolResult};
use crate::config::ToolSettings;
use crate::models::VideoProbe;

/// Runs the configured ffmpeg and ffprobe binaries.
///
/// Calls block until the process exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct SystemTools {
    ffmpeg: String,
    ffprobe: String,
}

impl SystemTools {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Build from the `[tools]` settings section.
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self::new(&settings.ffmpeg, &settings.ffprobe)
    }
}

impl Default for SystemTools {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl MediaTools for SystemTools {
    fn encoder_program(&self) -> &str {
        &self.ffmpeg
    }

    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput> {
        tracing::debug!("Running: {}", command);

        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::SpawnFailed {
                tool: command.program().to_string(),
                source,
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn probe(&self, path: &Path) -> ToolResult<VideoProbe> {
        if !path.is_file() {
            return Err(ToolError::open_failed(path, "file does not exist"));
        }

        tracing::debug!("Probing: {}", path.display());

        let output = Command::new(&self.ffprobe)
            .args(FFPROBE_ARGS)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::SpawnFailed {
                tool: self.ffprobe.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::open_failed(
                path,
                format!(
                    "ffprobe exited with code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        let probe = parse_ffprobe_json(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| ToolError::parse_failed(path, e.to_string()))?;
        tracing::debug!(
            "Probed {}: {:.3} fps, {}x{}, {} frames",
            path.display(),
            probe.fps,
            probe.width,
            probe.height,
            probe.frame_count
        );
        Ok(probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_rejects_missing_file() {
        let tools = SystemTools::default();
        let result = tools.probe(Path::new("/nonexistent/file.mp4"));
        assert!(matches!(result, Err(ToolError::OpenFailed { .. })));
    }

    #[test]
    fn run_reports_missing_program() {
        let tools = SystemTools::new("definitely-not-a-real-encoder-binary", "ffprobe");
        let cmd = ToolCommand::new(tools.encoder_program()).arg("-version");
        let result = tools.run(&cmd);
        assert!(matches!(result, Err(ToolError::SpawnFailed { .. })));
    }
}
