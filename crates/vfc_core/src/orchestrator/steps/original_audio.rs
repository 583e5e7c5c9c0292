//! Original audio step - copies the source audio out as WAV.

use crate::ffmpeg::extract_audio_command;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};
use crate::paths::side_audio_path;

use super::{require_file, run_encoder};

/// Suffix appended to the output stem.
pub const ORIGINAL_AUDIO_SUFFIX: &str = "_original";

/// Writes `{stem}_original.wav` next to the output when requested.
pub struct OriginalAudioStep;

impl OriginalAudioStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OriginalAudioStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for OriginalAudioStep {
    fn name(&self) -> &str {
        "Original audio"
    }

    fn validate_input(&self, _ctx: &Context<'_>) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome> {
        if !ctx.request.extract_original_audio {
            return Ok(StepOutcome::Skipped("not requested".to_string()));
        }

        let path = side_audio_path(&ctx.output_path, ORIGINAL_AUDIO_SUFFIX);
        let command = extract_audio_command(ctx.encoder(), &ctx.source, &path);
        run_encoder(ctx, &command)?;
        require_file(&path)?;

        ctx.logger.info(&format!("Original audio: {}", path.display()));
        state.original_audio_path = Some(path);
        Ok(StepOutcome::Success)
    }

    fn is_optional(&self) -> bool {
        true
    }
}
