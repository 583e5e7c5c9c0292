//! ffprobe JSON parsing.

use serde_json::Value;

use crate::models::VideoProbe;

/// Arguments for probing the first video stream as JSON.
pub(super) const FFPROBE_ARGS: &[&str] = &[
    "-v",
    "quiet",
    "-select_streams",
    "v:0",
    "-show_entries",
    "stream=r_frame_rate,avg_frame_rate,nb_frames,duration,width,height,bit_rate",
    "-show_entries",
    "format=duration,bit_rate",
    "-of",
    "json",
];

/// Parse the output of `ffprobe ... -of json`.
///
/// A file without a video stream parses to all zeros. Frame count falls
/// back to `duration * fps` when the container does not store it.
pub fn parse_ffprobe_json(json: &str) -> serde_json::Result<VideoProbe> {
    let data: Value = serde_json::from_str(json)?;

    let mut probe = VideoProbe::default();

    let Some(stream) = data
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
    else {
        tracing::warn!("ffprobe reported no video stream");
        return Ok(probe);
    };
    let format = data.get("format");

    // r_frame_rate is more reliable than avg_frame_rate
    probe.fps = str_field(stream, "r_frame_rate")
        .and_then(parse_fps_fraction)
        .or_else(|| str_field(stream, "avg_frame_rate").and_then(parse_fps_fraction))
        .unwrap_or(0.0);

    probe.width = stream
        .get("width")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;
    probe.height = stream
        .get("height")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    probe.bitrate = str_field(stream, "bit_rate")
        .and_then(parse_number)
        .or_else(|| format.and_then(|f| str_field(f, "bit_rate")).and_then(parse_number))
        .unwrap_or(0.0);

    probe.frame_count = str_field(stream, "nb_frames")
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    if probe.frame_count == 0 && probe.fps > 0.0 {
        // MKV often only has the format duration
        let duration = str_field(stream, "duration")
            .and_then(parse_number)
            .or_else(|| format.and_then(|f| str_field(f, "duration")).and_then(parse_number))
            .unwrap_or(0.0);
        probe.frame_count = (duration * probe.fps).round() as u64;
    }

    Ok(probe)
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| *s != "N/A")
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `"30000/1001"` or `"25"` into frames per second.
fn parse_fps_fraction(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => parse_number(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_stream() {
        let json = r#"{
            "streams": [{
                "r_frame_rate": "30000/1001",
                "avg_frame_rate": "30000/1001",
                "nb_frames": "1798",
                "duration": "59.993267",
                "width": 1920,
                "height": 1080,
                "bit_rate": "4500000"
            }],
            "format": {"duration": "60.0", "bit_rate": "4700000"}
        }"#;

        let probe = parse_ffprobe_json(json).unwrap();
        assert!((probe.fps - 29.97).abs() < 0.01);
        assert_eq!(probe.frame_count, 1798);
        assert_eq!((probe.width, probe.height), (1920, 1080));
        assert_eq!(probe.bitrate, 4_500_000.0);
    }

    #[test]
    fn estimates_frames_from_format_duration() {
        let json = r#"{
            "streams": [{"r_frame_rate": "25/1", "width": 720, "height": 1280}],
            "format": {"duration": "4.000000", "bit_rate": "900000"}
        }"#;

        let probe = parse_ffprobe_json(json).unwrap();
        assert_eq!(probe.frame_count, 100);
        assert_eq!(probe.bitrate, 900_000.0);
    }

    #[test]
    fn zero_denominator_falls_back_to_avg() {
        let json = r#"{"streams": [{"r_frame_rate": "0/0", "avg_frame_rate": "24/1"}]}"#;
        let probe = parse_ffprobe_json(json).unwrap();
        assert_eq!(probe.fps, 24.0);
    }

    #[test]
    fn no_stream_is_all_zeros() {
        let probe = parse_ffprobe_json(r#"{"streams": [], "format": {}}"#).unwrap();
        assert_eq!(probe, VideoProbe::default());
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = parse_ffprobe_json("not json").unwrap_err();
        assert!(err.is_syntax());
    }
}
