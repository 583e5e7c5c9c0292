//! The transcode request: every parameter the node accepts.

use serde::{Deserialize, Serialize};

use super::enums::{
    AudioBitrate, AudioChannels, AudioCodec, Container, FrameRate, ProcessingMethod,
    SampleRate, ScalingFilter, VideoCodec,
};

/// Lowest accepted quality slider value (highest bitrate).
pub const MIN_QUALITY_VALUE: u32 = 1;
/// Highest accepted quality slider value (lowest bitrate).
pub const MAX_QUALITY_VALUE: u32 = 40;

/// Full parameter set for one conversion.
///
/// Missing fields take the schema defaults, so a request file only needs
/// the paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeRequest {
    /// Source video file.
    pub video_path: String,
    /// Master toggle. When false nothing is processed.
    #[serde(deserialize_with = "toggle::deserialize")]
    pub output_enabled: bool,
    /// Base name for the output file (extension is ignored).
    pub output_filename: String,
    /// Output directory.
    pub output_path: String,
    /// Output container.
    pub video_format: Container,
    pub codec: VideoCodec,
    /// Quality slider, 1 (best) to 40 (smallest).
    pub video_quality: u32,
    pub frame_rate: FrameRate,
    /// Request hardware-accelerated decoding.
    #[serde(deserialize_with = "toggle::deserialize")]
    pub opencl_acceleration: bool,
    /// Target width in pixels; `-1`/`-2` keep the aspect ratio.
    #[serde(deserialize_with = "dimension::deserialize")]
    pub video_width: i32,
    #[serde(deserialize_with = "dimension::deserialize")]
    pub video_height: i32,
    pub scaling_filter: ScalingFilter,
    pub processing_method: ProcessingMethod,
    pub audio_codec: AudioCodec,
    /// Audio bitrate.
    pub bit_rate: AudioBitrate,
    pub audio_channels: AudioChannels,
    pub sample_rate: SampleRate,
    /// Also write the source audio to `<stem>_original.wav`.
    #[serde(deserialize_with = "toggle::deserialize")]
    pub extract_original_audio: bool,
    /// Also write a silent track of the source duration to `<stem>_silent.wav`.
    #[serde(deserialize_with = "toggle::deserialize")]
    pub generate_silent_audio: bool,
}

impl Default for TranscodeRequest {
    fn default() -> Self {
        Self {
            video_path: String::new(),
            output_enabled: true,
            output_filename: String::new(),
            output_path: String::new(),
            video_format: Container::default(),
            codec: VideoCodec::default(),
            video_quality: 10,
            frame_rate: FrameRate::default(),
            opencl_acceleration: false,
            video_width: 720,
            video_height: 1280,
            scaling_filter: ScalingFilter::default(),
            processing_method: ProcessingMethod::default(),
            audio_codec: AudioCodec::default(),
            bit_rate: AudioBitrate::default(),
            audio_channels: AudioChannels::default(),
            sample_rate: SampleRate::default(),
            extract_original_audio: false,
            generate_silent_audio: false,
        }
    }
}

impl TranscodeRequest {
    /// Create a request for a source file with default encoding parameters.
    pub fn new(video_path: impl Into<String>) -> Self {
        Self {
            video_path: video_path.into(),
            ..Default::default()
        }
    }

    /// Set the output directory and base file name.
    pub fn with_output(
        mut self,
        output_path: impl Into<String>,
        output_filename: impl Into<String>,
    ) -> Self {
        self.output_path = output_path.into();
        self.output_filename = output_filename.into();
        self
    }

    /// Parse a request from JSON.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Parse a request from TOML.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Width and height that `scale=` would reject.
    pub fn invalid_dimensions(&self) -> Vec<(&'static str, i32)> {
        [("video_width", self.video_width), ("video_height", self.video_height)]
            .into_iter()
            .filter(|(_, v)| !is_valid_dimension(*v))
            .collect()
    }
}

/// Toggles arrive from the host as `"true"`/`"false"` or
/// `"enable"`/`"disable"` strings; plain booleans are accepted too.
mod toggle {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Toggle {
        Bool(bool),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Toggle::deserialize(deserializer)? {
            Toggle::Bool(b) => Ok(b),
            Toggle::Text(s) => parse(&s).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "invalid toggle '{}' (expected true/false or enable/disable)",
                    s
                ))
            }),
        }
    }

    pub fn parse(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "enable" | "enabled" | "yes" | "on" => Some(true),
            "false" | "disable" | "disabled" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

pub use toggle::parse as parse_toggle;

/// Positive pixel count, or `-1`/`-2` to derive it from the aspect ratio.
pub fn is_valid_dimension(value: i32) -> bool {
    value > 0 || value == -1 || value == -2
}

/// Dimensions arrive as strings from text widgets or as plain integers.
mod dimension {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Number(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Dimension::deserialize(deserializer)? {
            Dimension::Number(n) => i32::try_from(n).ok(),
            Dimension::Text(s) => parse(&s),
        };
        value.ok_or_else(|| serde::de::Error::custom("invalid dimension (expected an integer)"))
    }

    fn parse(s: &str) -> Option<i32> {
        s.trim().parse::<i32>().ok()
    }
}
