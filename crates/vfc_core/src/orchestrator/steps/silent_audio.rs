//! Silent audio step - synthesizes a silent track as long as the source.

use crate::ffmpeg::silent_audio_command;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};
use crate::paths::side_audio_path;

use super::{require_file, run_encoder};

pub const SILENT_AUDIO_SUFFIX: &str = "_silent";

/// Writes `{stem}_silent.wav` with the request's sample rate and layout.
pub struct SilentAudioStep;

impl SilentAudioStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SilentAudioStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for SilentAudioStep {
    fn name(&self) -> &str {
        "Silent audio"
    }

    fn validate_input(&self, _ctx: &Context<'_>) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome> {
        if !ctx.request.generate_silent_audio {
            return Ok(StepOutcome::Skipped("not requested".to_string()));
        }

        let duration = state.source_duration();
        if duration <= 0.0 {
            ctx.logger
                .warn("Source duration is unknown; silent track will be empty");
        }

        let path = side_audio_path(&ctx.output_path, SILENT_AUDIO_SUFFIX);
        let command = silent_audio_command(
            ctx.encoder(),
            ctx.request.sample_rate,
            ctx.request.audio_channels,
            duration,
            &path,
        );
        run_encoder(ctx, &command)?;
        require_file(&path)?;

        ctx.logger.info(&format!("Silent audio: {}", path.display()));
        state.silent_audio_path = Some(path);
        Ok(StepOutcome::Success)
    }

    fn is_optional(&self) -> bool {
        true
    }
}
