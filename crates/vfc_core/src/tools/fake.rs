//! Scripted `MediaTools` for orchestration tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CommandOutput, MediaTools, ToolCommand, ToolError, ToolResult};
use crate::models::VideoProbe;

/// Records every command and answers from a script.
///
/// Commands are matched by a marker token they contain (e.g. `"anullsrc"`
/// or an output file suffix). On success the last argument (the output
/// path) is written as an empty file, like the real encoder would.
#[derive(Default)]
pub(crate) struct FakeTools {
    runs: RefCell<Vec<ToolCommand>>,
    probes: RefCell<Vec<PathBuf>>,
    failures: Vec<(String, i32, String)>,
    unspawnable: Vec<String>,
    probe_results: HashMap<PathBuf, VideoProbe>,
    default_probe: VideoProbe,
    unopenable: Vec<PathBuf>,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            default_probe: VideoProbe {
                fps: 25.0,
                width: 1920,
                height: 1080,
                frame_count: 250,
                bitrate: 4_000_000.0,
            },
            ..Default::default()
        }
    }

    /// Commands containing `marker` exit with `code` and `stderr`.
    pub fn fail_when(mut self, marker: &str, code: i32, stderr: &str) -> Self {
        self.failures
            .push((marker.to_string(), code, stderr.to_string()));
        self
    }

    /// Commands containing `marker` cannot be spawned.
    pub fn unspawnable_when(mut self, marker: &str) -> Self {
        self.unspawnable.push(marker.to_string());
        self
    }

    pub fn probe_result(mut self, path: impl Into<PathBuf>, probe: VideoProbe) -> Self {
        self.probe_results.insert(path.into(), probe);
        self
    }

    pub fn unopenable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unopenable.push(path.into());
        self
    }

    pub fn runs(&self) -> Vec<ToolCommand> {
        self.runs.borrow().clone()
    }

    pub fn run_count(&self) -> usize {
        self.runs.borrow().len()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.borrow().len()
    }

    /// Total external invocations (runs + probes).
    pub fn invocation_count(&self) -> usize {
        self.run_count() + self.probe_count()
    }

    fn matches(command: &ToolCommand, marker: &str) -> bool {
        command.args().iter().any(|a| a.contains(marker))
    }
}

impl MediaTools for FakeTools {
    fn encoder_program(&self) -> &str {
        "ffmpeg"
    }

    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput> {
        self.runs.borrow_mut().push(command.clone());

        if self.unspawnable.iter().any(|m| Self::matches(command, m)) {
            return Err(ToolError::SpawnFailed {
                tool: command.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        if let Some((_, code, stderr)) = self
            .failures
            .iter()
            .find(|(marker, _, _)| Self::matches(command, marker))
        {
            return Ok(CommandOutput {
                exit_code: *code,
                stdout: String::new(),
                stderr: stderr.clone(),
            });
        }

        if let Some(output) = command.args().last() {
            let _ = fs::write(output, b"");
        }

        Ok(CommandOutput::default())
    }

    fn probe(&self, path: &Path) -> ToolResult<VideoProbe> {
        self.probes.borrow_mut().push(path.to_path_buf());

        if self.unopenable.iter().any(|p| p == path) {
            return Err(ToolError::open_failed(path, "cannot open"));
        }

        Ok(self
            .probe_results
            .get(path)
            .copied()
            .unwrap_or(self.default_probe))
    }
}
