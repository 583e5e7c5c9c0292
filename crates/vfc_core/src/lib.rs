//! VFC Core - Backend logic for Video Format Converter
//!
//! This crate contains request validation, ffmpeg command construction,
//! the external tool boundary and the conversion pipeline. It has no UI
//! dependencies and is driven by the `vfc` CLI or any other host.

pub mod bitrate;
pub mod config;
pub mod ffmpeg;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod paths;
pub mod schema;
pub mod tools;

pub use bitrate::calculate_bitrate;
pub use models::TranscodeRequest;
pub use orchestrator::{
    process_video, process_video_with, ErrorKind, NodeOutput, ProcessOptions, TranscodeError,
    TranscodeOutcome, TranscodeOutput,
};
pub use schema::{node_schema, NodeSchema, RETURN_NAMES};
pub use tools::{MediaTools, SystemTools};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
