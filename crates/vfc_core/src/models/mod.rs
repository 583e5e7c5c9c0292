//! Data models for the converter.
//!
//! - Enums for every choice parameter (container, codec, audio settings)
//! - The transcode request
//! - Video metadata captured around the encode

mod enums;
mod metadata;
mod request;

pub use enums::{
    AudioBitrate, AudioChannels, AudioCodec, Container, FrameRate, ParseLabelError,
    ProcessingMethod, SampleRate, ScalingFilter, VideoCodec,
};
pub use metadata::{duration_secs, VideoInfo, VideoMetadata, VideoProbe};
pub use request::{
    is_valid_dimension, parse_toggle, TranscodeRequest, MAX_QUALITY_VALUE,
    MIN_QUALITY_VALUE,
};
