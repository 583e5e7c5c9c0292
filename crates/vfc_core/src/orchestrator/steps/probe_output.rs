//! Probe output step - measures the produced file.

use crate::models::VideoMetadata;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};

/// Re-opens the encoded file and records what was actually written.
pub struct ProbeOutputStep;

impl ProbeOutputStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProbeOutputStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ProbeOutputStep {
    fn name(&self) -> &str {
        "Probe output"
    }

    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()> {
        if !ctx.output_path.is_file() {
            return Err(StepError::probe_failed(
                &ctx.output_path,
                "output file is missing",
            ));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome> {
        let probe = ctx.tools.probe(&ctx.output_path)?;
        let metadata = VideoMetadata::from_probe(&probe);

        ctx.logger.info(&format!(
            "Output: {}x{} @ {:.3} fps, {} frames ({:.2}s)",
            metadata.width, metadata.height, metadata.fps, metadata.frame_count, metadata.duration
        ));

        state.loaded = Some(metadata);
        Ok(StepOutcome::Success)
    }
}
