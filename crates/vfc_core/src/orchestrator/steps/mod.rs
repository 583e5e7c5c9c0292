//! Pipeline step implementations.
//!
//! Each step handles one phase of a conversion, in this order:
//! probe source → transcode → original audio → silent audio → probe output.

mod original_audio;
mod probe_output;
mod probe_source;
mod silent_audio;
mod transcode;

pub use original_audio::{OriginalAudioStep, ORIGINAL_AUDIO_SUFFIX};
pub use probe_output::ProbeOutputStep;
pub use probe_source::ProbeSourceStep;
pub use silent_audio::{SilentAudioStep, SILENT_AUDIO_SUFFIX};
pub use transcode::TranscodeStep;

use std::path::Path;

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::types::Context;
use crate::tools::ToolCommand;

/// Run an encoder command, turning a non-zero exit into `CommandFailed`.
///
/// The command line is logged before running; on failure the captured
/// stderr goes to the logger's tail buffer and into the error.
fn run_encoder(ctx: &Context<'_>, command: &ToolCommand) -> StepResult<()> {
    let command_line = command.command_line();
    ctx.logger.command(&command_line);
    tracing::debug!("Running: {}", command_line);

    let output = ctx.tools.run(command)?;
    ctx.logger.encoder_output(&output.stderr);

    if !output.success() {
        ctx.logger.show_tail(command.program());
        return Err(StepError::command_failed(
            command.program(),
            output.exit_code,
            output.stderr.trim(),
            command_line,
        ));
    }

    Ok(())
}

/// Fail if the encoder reported success but left no file behind.
fn require_file(path: &Path) -> StepResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StepError::invalid_output(format!(
            "{} was not written",
            path.display()
        )))
    }
}
