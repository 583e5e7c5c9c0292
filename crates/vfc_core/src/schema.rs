//! Declarative parameter schema of the converter node.
//!
//! Hosts use this to render inputs; the defaults here are the same ones
//! [`TranscodeRequest::default`] applies.

use serde::Serialize;

use crate::models::{
    AudioBitrate, AudioChannels, AudioCodec, Container, FrameRate, ProcessingMethod,
    SampleRate, ScalingFilter, TranscodeRequest, VideoCodec, MAX_QUALITY_VALUE,
    MIN_QUALITY_VALUE,
};

/// Names of the four values a conversion returns, in order.
pub const RETURN_NAMES: [&str; 4] = [
    "output_filename",
    "video_info",
    "original_audio_path",
    "silent_audio_path",
];

/// Host menu category.
pub const CATEGORY: &str = "Video";

/// How a parameter is entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterKind {
    /// Pick one of a fixed set of labels.
    Choice {
        options: Vec<&'static str>,
        default: &'static str,
    },
    /// Integer, optionally shown as a slider.
    Int {
        min: u32,
        max: u32,
        step: u32,
        default: u32,
        slider: bool,
    },
    /// Two-state switch with host-facing labels.
    Toggle {
        on: &'static str,
        off: &'static str,
        default: bool,
    },
    /// Free text.
    String { default: String },
}

/// One input of the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParameterKind,
}

impl ParameterSpec {
    fn new(name: &'static str, kind: ParameterKind) -> Self {
        Self { name, kind }
    }
}

/// Full node description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSchema {
    pub category: &'static str,
    pub parameters: Vec<ParameterSpec>,
    pub return_names: [&'static str; 4],
}

impl NodeSchema {
    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

fn choice<T>(
    labels: Vec<&'static str>,
    default: T,
    label: fn(&T) -> &'static str,
) -> ParameterKind {
    ParameterKind::Choice {
        options: labels,
        default: label(&default),
    }
}

fn toggle(default: bool) -> ParameterKind {
    ParameterKind::Toggle {
        on: "enable",
        off: "disable",
        default,
    }
}

fn text(default: &str) -> ParameterKind {
    ParameterKind::String {
        default: default.to_string(),
    }
}

/// Build the schema for every request field.
pub fn node_schema() -> NodeSchema {
    let d = TranscodeRequest::default();

    let parameters = vec![
        ParameterSpec::new("video_path", text(&d.video_path)),
        ParameterSpec::new(
            "output_enabled",
            ParameterKind::Toggle {
                on: "true",
                off: "false",
                default: d.output_enabled,
            },
        ),
        ParameterSpec::new("output_filename", text(&d.output_filename)),
        ParameterSpec::new(
            "video_format",
            choice(Container::labels(), d.video_format, Container::label),
        ),
        ParameterSpec::new(
            "codec",
            choice(VideoCodec::labels(), d.codec, VideoCodec::label),
        ),
        ParameterSpec::new(
            "video_quality",
            ParameterKind::Int {
                min: MIN_QUALITY_VALUE,
                max: MAX_QUALITY_VALUE,
                step: 1,
                default: d.video_quality,
                slider: true,
            },
        ),
        ParameterSpec::new(
            "frame_rate",
            choice(FrameRate::labels(), d.frame_rate, FrameRate::label),
        ),
        ParameterSpec::new("opencl_acceleration", toggle(d.opencl_acceleration)),
        ParameterSpec::new("video_width", text(&d.video_width.to_string())),
        ParameterSpec::new("video_height", text(&d.video_height.to_string())),
        ParameterSpec::new(
            "scaling_filter",
            choice(ScalingFilter::labels(), d.scaling_filter, ScalingFilter::label),
        ),
        ParameterSpec::new(
            "processing_method",
            choice(
                ProcessingMethod::labels(),
                d.processing_method,
                ProcessingMethod::label,
            ),
        ),
        ParameterSpec::new(
            "audio_codec",
            choice(AudioCodec::labels(), d.audio_codec, AudioCodec::label),
        ),
        ParameterSpec::new(
            "bit_rate",
            choice(AudioBitrate::labels(), d.bit_rate, AudioBitrate::label),
        ),
        ParameterSpec::new(
            "audio_channels",
            choice(AudioChannels::labels(), d.audio_channels, AudioChannels::label),
        ),
        ParameterSpec::new(
            "sample_rate",
            choice(SampleRate::labels(), d.sample_rate, SampleRate::label),
        ),
        ParameterSpec::new("extract_original_audio", toggle(d.extract_original_audio)),
        ParameterSpec::new("generate_silent_audio", toggle(d.generate_silent_audio)),
        ParameterSpec::new("output_path", text(&d.output_path)),
    ];

    NodeSchema {
        category: CATEGORY,
        parameters,
        return_names: RETURN_NAMES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_request_field() {
        let schema = node_schema();
        let request = serde_json::to_value(TranscodeRequest::default()).unwrap();
        let fields = request.as_object().unwrap();

        assert_eq!(schema.parameters.len(), fields.len());
        for key in fields.keys() {
            assert!(schema.parameter(key).is_some(), "no schema for {}", key);
        }
    }

    #[test]
    fn defaults_match_request() {
        let schema = node_schema();
        assert_eq!(
            schema.parameter("codec").unwrap().kind,
            ParameterKind::Choice {
                options: vec!["av1", "h264", "h264(NVENC)", "hevc", "hevc(NVENC)"],
                default: "h264",
            }
        );
        match &schema.parameter("video_quality").unwrap().kind {
            ParameterKind::Int {
                min, max, default, ..
            } => assert_eq!((*min, *max, *default), (1, 40, 10)),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(node_schema()).unwrap();
        assert_eq!(json["return_names"][1], "video_info");
        let params = json["parameters"].as_array().unwrap();
        let format = params.iter().find(|p| p["name"] == "video_format").unwrap();
        assert_eq!(format["kind"], "choice");
        assert_eq!(format["default"], "mp4");
        let toggle = params
            .iter()
            .find(|p| p["name"] == "generate_silent_audio")
            .unwrap();
        assert_eq!(toggle["kind"], "toggle");
        assert_eq!(toggle["default"], false);
        let width = params.iter().find(|p| p["name"] == "video_width").unwrap();
        assert_eq!(width["kind"], "string");
        assert_eq!(width["default"], "720");
    }
}
