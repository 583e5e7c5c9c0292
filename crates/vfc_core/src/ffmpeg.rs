//! ffmpeg command construction.
//!
//! Pure functions from request parameters to [`ToolCommand`]s. Execution
//! happens in the orchestrator steps through `MediaTools`.

use std::path::Path;

use crate::models::{AudioChannels, SampleRate, TranscodeRequest};
use crate::tools::ToolCommand;

/// Codec used for the extracted original audio (WAV container).
pub const ORIGINAL_AUDIO_CODEC: &str = "pcm_s16le";

/// `scale=<w>:<h>:flags=<filter>` directive for `-vf`.
pub fn scale_filter(request: &TranscodeRequest) -> String {
    format!(
        "scale={}:{}:flags={}",
        request.video_width,
        request.video_height,
        request.scaling_filter.label()
    )
}

/// Primary transcode command.
///
/// ```text
/// ffmpeg [-hwaccel <backend>] -i <src> -c:v <enc> -b:v <N>k -r <fps>
///        -vf scale=<w>:<h>:flags=<f> -c:a <codec> -b:a <ab>k [-ac <n>]
///        -ar <rate> -y <out>
/// ```
///
/// `-ac` is left out for `audio_channels = original` so the source layout
/// passes through. `hwaccel` names the acceleration backend and is only
/// applied when the request enables it.
pub fn transcode_command(
    program: &str,
    request: &TranscodeRequest,
    source: &Path,
    output: &Path,
    bitrate_kbps: u32,
    hwaccel: &str,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(program)
        .flag("-i", path_arg(source))
        .flag("-c:v", request.codec.encoder_name())
        .flag("-b:v", format!("{}k", bitrate_kbps))
        .flag("-r", request.frame_rate.label())
        .flag("-vf", scale_filter(request))
        .flag("-c:a", request.audio_codec.label())
        .flag("-b:a", format!("{}k", request.bit_rate.label()));

    if let Some(count) = request.audio_channels.channel_count() {
        cmd = cmd.flag("-ac", count.to_string());
    }

    cmd = cmd
        .flag("-ar", request.sample_rate.label())
        .arg("-y")
        .arg(path_arg(output));

    if request.opencl_acceleration {
        cmd = cmd.prepend_args(["-hwaccel", hwaccel]);
    }

    cmd
}

/// Strip video and write the source audio as PCM WAV.
pub fn extract_audio_command(program: &str, source: &Path, output: &Path) -> ToolCommand {
    ToolCommand::new(program)
        .flag("-i", path_arg(source))
        .arg("-vn")
        .flag("-acodec", ORIGINAL_AUDIO_CODEC)
        .arg("-y")
        .arg(path_arg(output))
}

/// Synthesize silence of `duration_secs` with the requested rate/layout.
pub fn silent_audio_command(
    program: &str,
    sample_rate: SampleRate,
    channels: AudioChannels,
    duration_secs: f64,
    output: &Path,
) -> ToolCommand {
    ToolCommand::new(program)
        .flag("-f", "lavfi")
        .flag(
            "-i",
            format!(
                "anullsrc=r={}:cl={}",
                sample_rate.label(),
                channels.silence_layout()
            ),
        )
        .flag("-t", format_duration(duration_secs))
        .flag("-q:a", "0")
        .arg("-y")
        .arg(path_arg(output))
}

/// Seconds as ffmpeg reads them; integral values keep one decimal (`10.0`).
fn format_duration(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{:.1}", secs)
    } else {
        secs.to_string()
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AudioCodec, Container, FrameRate, ScalingFilter, VideoCodec};

    fn request() -> TranscodeRequest {
        TranscodeRequest {
            video_format: Container::Mkv,
            codec: VideoCodec::Hevc,
            frame_rate: FrameRate::Fps30,
            scaling_filter: ScalingFilter::Lanczos,
            audio_codec: AudioCodec::Mp3,
            ..TranscodeRequest::new("in.mp4")
        }
    }

    #[test]
    fn transcode_flag_order() {
        let cmd = transcode_command(
            "ffmpeg",
            &request(),
            Path::new("in.mp4"),
            Path::new("out/clip_0000.mkv"),
            7715,
            "opencl",
        );

        assert_eq!(
            cmd.tokens(),
            vec![
                "ffmpeg",
                "-i",
                "in.mp4",
                "-c:v",
                "libx265",
                "-b:v",
                "7715k",
                "-r",
                "30",
                "-vf",
                "scale=720:1280:flags=lanczos",
                "-c:a",
                "mp3",
                "-b:a",
                "192k",
                "-ac",
                "2",
                "-ar",
                "48000",
                "-y",
                "out/clip_0000.mkv",
            ]
        );
    }

    #[test]
    fn hwaccel_inserted_after_program() {
        let req = TranscodeRequest {
            opencl_acceleration: true,
            ..request()
        };
        let cmd = transcode_command(
            "ffmpeg",
            &req,
            Path::new("in.mp4"),
            Path::new("o.mkv"),
            100,
            "opencl",
        );

        assert_eq!(&cmd.tokens()[..5], &["ffmpeg", "-hwaccel", "opencl", "-i", "in.mp4"]);
    }

    #[test]
    fn original_channels_omit_ac() {
        let req = TranscodeRequest {
            audio_channels: AudioChannels::Original,
            ..request()
        };
        let cmd = transcode_command(
            "ffmpeg",
            &req,
            Path::new("in.mp4"),
            Path::new("o.mkv"),
            100,
            "opencl",
        );

        assert_eq!(cmd.value_of("-ac"), None);
        assert_eq!(cmd.value_of("-ar"), Some("48000"));
    }

    #[test]
    fn mono_maps_to_one_channel() {
        let req = TranscodeRequest {
            audio_channels: AudioChannels::Mono,
            ..request()
        };
        let cmd = transcode_command(
            "ffmpeg",
            &req,
            Path::new("in.mp4"),
            Path::new("o.mkv"),
            100,
            "opencl",
        );
        assert_eq!(cmd.value_of("-ac"), Some("1"));
    }

    #[test]
    fn scale_keeps_aspect_marker() {
        let req = TranscodeRequest {
            video_width: -2,
            video_height: 1080,
            ..request()
        };
        assert_eq!(scale_filter(&req), "scale=-2:1080:flags=lanczos");
    }

    #[test]
    fn extract_strips_video() {
        let cmd = extract_audio_command("ffmpeg", Path::new("in.mp4"), Path::new("a_original.wav"));
        assert_eq!(
            cmd.tokens(),
            vec!["ffmpeg", "-i", "in.mp4", "-vn", "-acodec", "pcm_s16le", "-y", "a_original.wav"]
        );
    }

    #[test]
    fn silence_uses_duration_and_layout() {
        let cmd = silent_audio_command(
            "ffmpeg",
            SampleRate::Hz44100,
            AudioChannels::Stereo,
            12.5,
            Path::new("a_silent.wav"),
        );
        assert_eq!(cmd.value_of("-i"), Some("anullsrc=r=44100:cl=stereo"));
        assert_eq!(cmd.value_of("-t"), Some("12.5"));
        assert_eq!(cmd.value_of("-q:a"), Some("0"));

        let mono = silent_audio_command(
            "ffmpeg",
            SampleRate::Hz48000,
            AudioChannels::Original,
            10.0,
            Path::new("a_silent.wav"),
        );
        assert_eq!(mono.value_of("-i"), Some("anullsrc=r=48000:cl=mono"));
        assert_eq!(mono.value_of("-t"), Some("10.0"));
    }
}
