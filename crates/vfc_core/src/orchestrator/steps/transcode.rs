//! Transcode step - the primary ffmpeg encode.

use crate::bitrate::calculate_bitrate;
use crate::ffmpeg::transcode_command;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome, TranscodeRecord};

use super::{require_file, run_encoder};

/// Encodes the source into the resolved output path.
pub struct TranscodeStep;

impl TranscodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TranscodeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for TranscodeStep {
    fn name(&self) -> &str {
        "Transcode"
    }

    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()> {
        if ctx.output_path.exists() {
            return Err(StepError::invalid_input(format!(
                "refusing to overwrite {}",
                ctx.output_path.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome> {
        let request = ctx.request;
        let bitrate_kbps = calculate_bitrate(request.video_quality);

        ctx.logger.info(&format!(
            "Encoding with {} ({}) at {} kbps, quality {}",
            request.codec,
            request.codec.encoder_name(),
            bitrate_kbps,
            request.video_quality
        ));

        let command = transcode_command(
            ctx.encoder(),
            request,
            &ctx.source,
            &ctx.output_path,
            bitrate_kbps,
            &ctx.options.hwaccel_backend,
        );
        run_encoder(ctx, &command)?;

        state.transcode = Some(TranscodeRecord {
            command_line: command.command_line(),
            bitrate_kbps,
        });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context<'_>, _state: &JobState) -> StepResult<()> {
        require_file(&ctx.output_path)
    }
}
