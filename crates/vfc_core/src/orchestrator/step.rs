//! Pipeline step trait definition.

use super::errors::StepResult;
use super::types::{Context, JobState, StepOutcome};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
///
/// A failure in an optional step is logged as a warning and the run
/// continues; a failure in a required step aborts the conversion.
pub trait PipelineStep {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    fn validate_input(&self, ctx: &Context<'_>) -> StepResult<()>;

    /// Execute the step's main work, recording results in `state`.
    ///
    /// Returns `StepOutcome::Skipped` when the request did not ask for
    /// this step.
    fn execute(&self, ctx: &Context<'_>, state: &mut JobState) -> StepResult<StepOutcome>;

    /// Validate outputs after `execute` returned `Success`.
    fn validate_output(&self, _ctx: &Context<'_>, _state: &JobState) -> StepResult<()> {
        Ok(())
    }

    /// Whether a failure of this step is recoverable.
    fn is_optional(&self) -> bool {
        false
    }
}
