//! Command-line definitions and request assembly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use vfc_core::models::{
    parse_toggle, AudioBitrate, AudioChannels, AudioCodec, Container, FrameRate,
    ProcessingMethod, SampleRate, ScalingFilter, TranscodeRequest, VideoCodec,
};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = ".config/settings.toml";

/// Video format converter driven by ffmpeg
#[derive(Parser, Debug)]
#[command(name = "vfc", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings file (created with defaults if missing)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable debug logging and echo the job log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert one video and print the result as JSON
    Run(RunArgs),
    /// Print the parameter schema as JSON
    Schema,
    /// Print the video bitrate (kbps) for a quality value
    Bitrate {
        /// Quality, 1 (best) to 40 (smallest)
        quality: u32,
    },
}

/// Request fields. Flags override values from `--request`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Request file (.json or .toml)
    #[arg(long)]
    pub request: Option<PathBuf>,

    #[arg(long)]
    pub video_path: Option<String>,
    #[arg(long, value_parser = toggle_arg)]
    pub output_enabled: Option<bool>,
    #[arg(long)]
    pub output_filename: Option<String>,
    /// Output directory (defaults to `paths.output_folder`)
    #[arg(long)]
    pub output_path: Option<String>,
    #[arg(long)]
    pub video_format: Option<Container>,
    #[arg(long)]
    pub codec: Option<VideoCodec>,
    #[arg(long)]
    pub video_quality: Option<u32>,
    #[arg(long)]
    pub frame_rate: Option<FrameRate>,
    #[arg(long, value_parser = toggle_arg)]
    pub opencl_acceleration: Option<bool>,
    /// Width in pixels, or -1/-2 to keep the aspect ratio
    #[arg(long, allow_negative_numbers = true)]
    pub video_width: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub video_height: Option<i32>,
    #[arg(long)]
    pub scaling_filter: Option<ScalingFilter>,
    #[arg(long)]
    pub processing_method: Option<ProcessingMethod>,
    #[arg(long)]
    pub audio_codec: Option<AudioCodec>,
    /// Audio bitrate in kbps
    #[arg(long)]
    pub bit_rate: Option<AudioBitrate>,
    #[arg(long)]
    pub audio_channels: Option<AudioChannels>,
    #[arg(long)]
    pub sample_rate: Option<SampleRate>,
    #[arg(long, value_parser = toggle_arg)]
    pub extract_original_audio: Option<bool>,
    #[arg(long, value_parser = toggle_arg)]
    pub generate_silent_audio: Option<bool>,
}

fn toggle_arg(s: &str) -> Result<bool, String> {
    parse_toggle(s).ok_or_else(|| format!("expected enable/disable or true/false, got '{}'", s))
}

/// Set `target` when the flag was given.
fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl RunArgs {
    /// Load `--request` (if any), apply flag overrides and fill an empty
    /// output directory from settings.
    pub fn build_request(&self, default_output_folder: &str) -> Result<TranscodeRequest> {
        let mut request = match &self.request {
            Some(path) => load_request(path)?,
            None => TranscodeRequest::default(),
        };

        set(&mut request.video_path, &self.video_path);
        set(&mut request.output_enabled, &self.output_enabled);
        set(&mut request.output_filename, &self.output_filename);
        set(&mut request.output_path, &self.output_path);
        set(&mut request.video_format, &self.video_format);
        set(&mut request.codec, &self.codec);
        set(&mut request.video_quality, &self.video_quality);
        set(&mut request.frame_rate, &self.frame_rate);
        set(&mut request.opencl_acceleration, &self.opencl_acceleration);
        set(&mut request.video_width, &self.video_width);
        set(&mut request.video_height, &self.video_height);
        set(&mut request.scaling_filter, &self.scaling_filter);
        set(&mut request.processing_method, &self.processing_method);
        set(&mut request.audio_codec, &self.audio_codec);
        set(&mut request.bit_rate, &self.bit_rate);
        set(&mut request.audio_channels, &self.audio_channels);
        set(&mut request.sample_rate, &self.sample_rate);
        set(
            &mut request.extract_original_audio,
            &self.extract_original_audio,
        );
        set(&mut request.generate_silent_audio, &self.generate_silent_audio);

        if request.output_path.trim().is_empty() {
            request.output_path = default_output_folder.to_string();
        }

        Ok(request)
    }
}

/// Parse a request file, choosing the format by extension.
pub fn load_request(path: &Path) -> Result<TranscodeRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let request = if is_json {
        TranscodeRequest::from_json(&content)
            .with_context(|| format!("Invalid JSON request {}", path.display()))?
    } else {
        TranscodeRequest::from_toml(&content)
            .with_context(|| format!("Invalid TOML request {}", path.display()))?
    };
    Ok(request)
}
