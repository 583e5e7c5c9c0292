//! Conversion orchestrator.
//!
//! Validates a request, resolves the output path and runs the conversion
//! as a sequence of steps against a [`MediaTools`](crate::tools::MediaTools)
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! process_video
//!     ├── validate (source, toggle, output location, quality, codec)
//!     ├── resolve output path
//!     └── Pipeline
//!         ├── Step: Probe source
//!         ├── Step: Transcode
//!         ├── Step: Original audio   (optional)
//!         ├── Step: Silent audio     (optional)
//!         └── Step: Probe output
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vfc_core::logging::{JobLogger, LogConfig};
//! use vfc_core::models::TranscodeRequest;
//! use vfc_core::orchestrator::process_video;
//! use vfc_core::tools::SystemTools;
//!
//! let request = TranscodeRequest::new("clip.mov").with_output("converted", "clip");
//! let logger = JobLogger::detached("clip", LogConfig::default(), None);
//!
//! let outcome = process_video(&request, &SystemTools::default(), &logger).unwrap();
//! println!("{:?}", outcome.to_node_output());
//! ```

mod errors;
mod pipeline;
mod process;
mod step;
pub mod steps;
mod types;
mod validation;

pub use errors::{ErrorKind, StepError, StepResult, TranscodeError, TranscodeResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use process::{create_standard_pipeline, process_video, process_video_with};
pub use step::PipelineStep;
pub use steps::{
    OriginalAudioStep, ProbeOutputStep, ProbeSourceStep, SilentAudioStep, TranscodeStep,
};
pub use types::{
    Context, JobState, NodeOutput, ProcessOptions, StepOutcome, TranscodeOutcome,
    TranscodeOutput, TranscodeRecord, DISABLED_OUTPUT,
};
pub use validation::{validate_encoding, validate_output_location, validate_source};
