//! Entry point for one conversion.

use crate::logging::JobLogger;
use crate::models::{TranscodeRequest, VideoInfo};
use crate::paths::{ensure_output_dir, unique_output_path};
use crate::tools::MediaTools;

use super::errors::{StepError, TranscodeError, TranscodeResult};
use super::pipeline::Pipeline;
use super::steps::{
    OriginalAudioStep, ProbeOutputStep, ProbeSourceStep, SilentAudioStep, TranscodeStep,
};
use super::types::{Context, JobState, ProcessOptions, TranscodeOutcome, TranscodeOutput};
use super::validation::{validate_encoding, validate_output_location, validate_source};

/// Create the conversion pipeline with all steps in order.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(ProbeSourceStep::new())
        .with_step(TranscodeStep::new())
        .with_step(OriginalAudioStep::new())
        .with_step(SilentAudioStep::new())
        .with_step(ProbeOutputStep::new())
}

/// Convert one video with default options.
pub fn process_video(
    request: &TranscodeRequest,
    tools: &dyn MediaTools,
    logger: &JobLogger,
) -> TranscodeResult<TranscodeOutcome> {
    process_video_with(request, tools, logger, &ProcessOptions::default())
}

/// Convert one video.
///
/// Validation happens before any process runs or any directory is
/// created. With `output_enabled` off the call returns
/// [`TranscodeOutcome::Disabled`] without side effects.
pub fn process_video_with(
    request: &TranscodeRequest,
    tools: &dyn MediaTools,
    logger: &JobLogger,
    options: &ProcessOptions,
) -> TranscodeResult<TranscodeOutcome> {
    let job_name = logger.job_name().to_string();

    let source = validate_source(request).map_err(|e| log_rejection(logger, e))?;

    if !request.output_enabled {
        logger.info("Output disabled, nothing to do");
        return Ok(TranscodeOutcome::Disabled);
    }

    let output_dir = validate_output_location(request).map_err(|e| log_rejection(logger, e))?;
    validate_encoding(request, options).map_err(|e| log_rejection(logger, e))?;

    ensure_output_dir(&output_dir).map_err(|e| {
        logger.error(&format!(
            "Cannot create output directory {}: {}",
            output_dir.display(),
            e
        ));
        TranscodeError::setup_failed(&job_name, &output_dir, e)
    })?;

    let output_path = unique_output_path(
        &output_dir,
        &request.output_filename,
        request.video_format.extension(),
    );

    logger.phase(&format!("Converting {}", source.display()));
    logger.info(&format!("Output: {}", output_path.display()));
    tracing::info!(
        "Converting {} -> {}",
        source.display(),
        output_path.display()
    );

    let ctx = Context {
        request,
        tools,
        logger,
        options,
        job_name: job_name.clone(),
        source,
        output_path,
    };
    let mut state = JobState::default();

    let pipeline = create_standard_pipeline();
    logger.debug(&format!("Steps: {}", pipeline.step_names().join(" -> ")));
    let run = pipeline.run(&ctx, &mut state)?;
    tracing::debug!(
        "Steps completed: {:?}, skipped: {:?}, failed: {:?}",
        run.steps_completed,
        run.steps_skipped,
        run.steps_failed
    );

    let transcode = state.transcode.ok_or_else(|| {
        TranscodeError::step_failed(
            &job_name,
            "Transcode",
            StepError::invalid_output("no encode was recorded"),
        )
    })?;

    logger.success(&format!("Wrote {}", ctx.output_path.display()));
    logger.flush();

    Ok(TranscodeOutcome::Completed(TranscodeOutput {
        output_path: ctx.output_path,
        video_info: VideoInfo {
            source: state.source.unwrap_or_default(),
            loaded: state.loaded.unwrap_or_default(),
        },
        original_audio_path: state.original_audio_path,
        silent_audio_path: state.silent_audio_path,
        command_line: transcode.command_line,
        bitrate_kbps: transcode.bitrate_kbps,
    }))
}

fn log_rejection(logger: &JobLogger, err: TranscodeError) -> TranscodeError {
    logger.error(&err.to_string());
    err
}
