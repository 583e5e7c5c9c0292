//! Core enums for the encoding parameters.
//!
//! Every enum parses from the label shown in the node UI (case-insensitive)
//! and serializes back to that label, so requests written by hand or by the
//! host read the same way.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a label does not match any allowed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} '{value}' (allowed: {allowed})")]
pub struct ParseLabelError {
    pub what: &'static str,
    pub value: String,
    pub allowed: String,
}

impl ParseLabelError {
    fn new(what: &'static str, value: &str, labels: &[&str]) -> Self {
        Self {
            what,
            value: value.to_string(),
            allowed: labels.join(", "),
        }
    }
}

/// Implements `label()`, `all()`, `Display`, `FromStr` and label-based serde
/// for a fieldless enum.
macro_rules! labeled_enum {
    ($ty:ident, $what:literal, { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// User-facing label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }

            /// All values in schema order.
            pub fn all() -> &'static [$ty] {
                &[$($ty::$variant),+]
            }

            /// All labels in schema order.
            pub fn labels() -> Vec<&'static str> {
                Self::all().iter().map(|v| v.label()).collect()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $ty {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseLabelError::new($what, s, &Self::labels()))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = LabelValue::deserialize(deserializer)?;
                value.as_label().parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Accepts both `"25"` and `25` for numeric labels.
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelValue {
    Text(String),
    Number(u64),
}

impl LabelValue {
    fn as_label(&self) -> String {
        match self {
            LabelValue::Text(s) => s.clone(),
            LabelValue::Number(n) => n.to_string(),
        }
    }
}

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Container {
    Avi,
    Mov,
    Mkv,
    #[default]
    Mp4,
}

labeled_enum!(Container, "video format", {
    Avi => "avi",
    Mov => "mov",
    Mkv => "mkv",
    Mp4 => "mp4",
});

impl Container {
    /// File extension used for the output path.
    pub fn extension(&self) -> &'static str {
        self.label()
    }

    /// Codecs this container is known to carry.
    pub fn supported_codecs(&self) -> &'static [VideoCodec] {
        use VideoCodec::*;
        match self {
            Container::Avi => &[Av1, H264, H264Nvenc],
            Container::Mov => &[H264, H264Nvenc, Hevc, HevcNvenc],
            Container::Mkv | Container::Mp4 => &[Av1, H264, H264Nvenc, Hevc, HevcNvenc],
        }
    }

    pub fn supports(&self, codec: VideoCodec) -> bool {
        self.supported_codecs().contains(&codec)
    }
}

/// Video codec as chosen in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VideoCodec {
    Av1,
    #[default]
    H264,
    H264Nvenc,
    Hevc,
    HevcNvenc,
}

labeled_enum!(VideoCodec, "codec", {
    Av1 => "av1",
    H264 => "h264",
    H264Nvenc => "h264(NVENC)" | "h264-NVENC" | "h264_nvenc",
    Hevc => "hevc",
    HevcNvenc => "hevc(NVENC)" | "hevc-NVENC" | "hevc_nvenc",
});

impl VideoCodec {
    /// Encoder identifier passed to ffmpeg's `-c:v`.
    ///
    /// Labels without a dedicated encoder pass through unchanged.
    pub fn encoder_name(&self) -> &'static str {
        match self {
            VideoCodec::H264Nvenc => "h264_nvenc",
            VideoCodec::HevcNvenc => "hevc_nvenc",
            VideoCodec::Hevc => "libx265",
            VideoCodec::Av1 => "libaom-av1",
            VideoCodec::H264 => self.label(),
        }
    }
}

/// Target output frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameRate {
    Fps8,
    Fps15,
    Fps24,
    #[default]
    Fps25,
    Fps30,
    Fps50,
    Fps59,
    Fps60,
    Fps120,
}

labeled_enum!(FrameRate, "frame rate", {
    Fps8 => "8",
    Fps15 => "15",
    Fps24 => "24",
    Fps25 => "25",
    Fps30 => "30",
    Fps50 => "50",
    Fps59 => "59",
    Fps60 => "60",
    Fps120 => "120",
});

/// Resampling algorithm for the `scale` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalingFilter {
    Bilinear,
    #[default]
    Bicubic,
    Neighbor,
    Area,
    Bicublin,
    Lanczos,
}

labeled_enum!(ScalingFilter, "scaling filter", {
    Bilinear => "bilinear",
    Bicubic => "bicubic",
    Neighbor => "neighbor",
    Area => "area",
    Bicublin => "bicublin",
    Lanczos => "lanczos",
});

/// How the frame is fitted to the target size.
///
/// Accepted for compatibility; the scale directive does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingMethod {
    #[default]
    Fill,
    Crop,
}

labeled_enum!(ProcessingMethod, "processing method", {
    Fill => "fill",
    Crop => "crop",
});

/// Audio codec passed to `-c:a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioCodec {
    Copy,
    Mp3,
    #[default]
    Aac,
}

labeled_enum!(AudioCodec, "audio codec", {
    Copy => "copy",
    Mp3 => "mp3",
    Aac => "aac",
});

/// Audio bitrate in kbps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioBitrate {
    Kbps96,
    Kbps128,
    #[default]
    Kbps192,
}

labeled_enum!(AudioBitrate, "audio bit rate", {
    Kbps96 => "96",
    Kbps128 => "128",
    Kbps192 => "192",
});

/// Output channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioChannels {
    Original,
    Mono,
    #[default]
    Stereo,
}

labeled_enum!(AudioChannels, "audio channels", {
    Original => "original",
    Mono => "mono",
    Stereo => "stereo",
});

impl AudioChannels {
    /// Value for ffmpeg's `-ac`, or `None` to keep the source layout.
    pub fn channel_count(&self) -> Option<u32> {
        match self {
            AudioChannels::Stereo => Some(2),
            AudioChannels::Mono => Some(1),
            AudioChannels::Original => None,
        }
    }

    /// Channel layout name for the `anullsrc` generator.
    pub fn silence_layout(&self) -> &'static str {
        match self {
            AudioChannels::Stereo => "stereo",
            _ => "mono",
        }
    }
}

/// Audio sample rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleRate {
    Hz44100,
    #[default]
    Hz48000,
}

labeled_enum!(SampleRate, "sample rate", {
    Hz44100 => "44100",
    Hz48000 => "48000",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_labels_parse_case_insensitive() {
        assert_eq!("H264".parse::<VideoCodec>().unwrap(), VideoCodec::H264);
        assert_eq!(
            "hevc(nvenc)".parse::<VideoCodec>().unwrap(),
            VideoCodec::HevcNvenc
        );
        assert_eq!(
            "h264-NVENC".parse::<VideoCodec>().unwrap(),
            VideoCodec::H264Nvenc
        );
    }

    #[test]
    fn unknown_label_lists_allowed_values() {
        let err = "webm".parse::<Container>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("webm"));
        assert!(msg.contains("avi, mov, mkv, mp4"));
    }

    #[test]
    fn encoder_names_translate_labels() {
        assert_eq!(VideoCodec::H264Nvenc.encoder_name(), "h264_nvenc");
        assert_eq!(VideoCodec::HevcNvenc.encoder_name(), "hevc_nvenc");
        assert_eq!(VideoCodec::Hevc.encoder_name(), "libx265");
        assert_eq!(VideoCodec::Av1.encoder_name(), "libaom-av1");
        assert_eq!(VideoCodec::H264.encoder_name(), "h264");
    }

    #[test]
    fn avi_rejects_hevc() {
        assert!(Container::Avi.supports(VideoCodec::H264Nvenc));
        assert!(!Container::Avi.supports(VideoCodec::Hevc));
        assert!(!Container::Mov.supports(VideoCodec::Av1));
        assert!(Container::Mp4.supports(VideoCodec::HevcNvenc));
    }

    #[test]
    fn channels_map_to_ffmpeg_values() {
        assert_eq!(AudioChannels::Stereo.channel_count(), Some(2));
        assert_eq!(AudioChannels::Mono.channel_count(), Some(1));
        assert_eq!(AudioChannels::Original.channel_count(), None);
        assert_eq!(AudioChannels::Original.silence_layout(), "mono");
    }

    #[test]
    fn numeric_labels_deserialize_from_numbers_and_strings() {
        let from_num: FrameRate = serde_json::from_str("30").unwrap();
        let from_str: FrameRate = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(from_num, FrameRate::Fps30);
        assert_eq!(from_str, FrameRate::Fps30);
        assert_eq!(serde_json::to_string(&SampleRate::Hz44100).unwrap(), "\"44100\"");
    }
}
