//! Pipeline runner that executes steps in sequence.

use super::errors::{StepResult, TranscodeError, TranscodeResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// Steps run strictly in order with validation before and after each
/// one. Required-step failures abort; optional-step failures become
/// warnings.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run every step against `state`.
    pub fn run(&self, ctx: &Context<'_>, state: &mut JobState) -> TranscodeResult<PipelineRunResult> {
        let mut result = PipelineRunResult::default();

        for step in &self.steps {
            let step_name = step.name();

            match run_step(step.as_ref(), ctx, state) {
                Ok(StepOutcome::Success) => {
                    ctx.logger.success(&format!("{} completed", step_name));
                    result.steps_completed.push(step_name.to_string());
                }
                Ok(StepOutcome::Skipped(reason)) => {
                    ctx.logger.debug(&format!("{} skipped: {}", step_name, reason));
                    result.steps_skipped.push(step_name.to_string());
                }
                Err(e) if step.is_optional() => {
                    ctx.logger
                        .warn(&format!("{} failed, continuing without it: {}", step_name, e));
                    result.steps_failed.push(step_name.to_string());
                }
                Err(e) => {
                    ctx.logger.error(&format!("{} failed: {}", step_name, e));
                    return Err(TranscodeError::step_failed(&ctx.job_name, step_name, e));
                }
            }
        }

        Ok(result)
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn run_step(
    step: &dyn PipelineStep,
    ctx: &Context<'_>,
    state: &mut JobState,
) -> StepResult<StepOutcome> {
    let step_name = step.name();

    ctx.logger.debug(&format!("Validating input for '{}'", step_name));
    step.validate_input(ctx)?;

    ctx.logger.debug(&format!("Executing '{}'", step_name));
    let outcome = step.execute(ctx, state)?;

    if outcome == StepOutcome::Success {
        step.validate_output(ctx, state)?;
    }
    Ok(outcome)
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that were not requested.
    pub steps_skipped: Vec<String>,
    /// Optional steps that failed and were dropped.
    pub steps_failed: Vec<String>,
}
