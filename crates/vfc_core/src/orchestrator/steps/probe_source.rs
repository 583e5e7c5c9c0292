//! Probe source step - measures the input before encoding.

use crate::models::VideoMetadata;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, StepOutcome};

/// Reads fps, size, frame count and bitrate of the source.
///
/// An unreadable source is a problem with the request, so failures are
/// reported as invalid input rather than a tool failure.
pub struct ProbeSourceStep;

impl ProbeSourceStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProbeSourceStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ProbeSourceStep {
    fn name(&self) -> &str {
        "Probe source"
    }

    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()> {
        if !ctx.source.is_file() {
            return Err(StepError::invalid_input(format!(
                "{} does not exist",
                ctx.source.display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome> {
        let probe = ctx.tools.probe(&ctx.source).map_err(|e| {
            StepError::invalid_input(format!(
                "{} could not be loaded: {}",
                ctx.source.display(),
                e
            ))
        })?;

        let metadata = VideoMetadata::from_probe(&probe);
        let bitrate_kbps = probe.bitrate / 1000.0;

        ctx.logger.info(&format!(
            "Source: {}x{} @ {:.3} fps, {} frames ({:.2}s)",
            metadata.width, metadata.height, metadata.fps, metadata.frame_count, metadata.duration
        ));
        tracing::debug!(
            "Source bitrate {:.0} kbps (not used for the target bitrate)",
            bitrate_kbps
        );

        state.source = Some(metadata);
        state.source_bitrate_kbps = Some(bitrate_kbps);
        Ok(StepOutcome::Success)
    }
}
