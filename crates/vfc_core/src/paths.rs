//! Output path resolution.
//!
//! Output files are named `{base}_{NNNN}.{ext}` with the smallest counter
//! that does not collide with an existing file, so a conversion never
//! overwrites earlier results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Base name used when the requested file name is empty.
pub const DEFAULT_BASE_NAME: &str = "video";

/// Extension for side audio artifacts.
pub const SIDE_AUDIO_EXTENSION: &str = "wav";

/// Convert Windows separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Create the output directory (and parents) if missing.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        tracing::debug!("Creating output directory: {}", dir.display());
    }
    fs::create_dir_all(dir)
}

/// Strip any extension from the requested output name.
///
/// `clip.mov` → `clip`, `.hidden` → `.hidden`, empty → [`DEFAULT_BASE_NAME`].
pub fn base_name(output_filename: &str) -> String {
    if output_filename.is_empty() {
        return DEFAULT_BASE_NAME.to_string();
    }

    // Only the final component's extension counts, like splitext.
    let split_at = output_filename.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (dir_part, file_part) = output_filename.split_at(split_at);

    let stem = match file_part.rfind('.') {
        Some(idx) if file_part[..idx].chars().any(|c| c != '.') => &file_part[..idx],
        _ => file_part,
    };

    format!("{}{}", dir_part, stem)
}

/// First non-existing `{dir}/{base}_{NNNN}.{extension}`.
pub fn unique_output_path(dir: &Path, output_filename: &str, extension: &str) -> PathBuf {
    let base = base_name(output_filename);
    let mut counter: u64 = 0;

    loop {
        let candidate = dir.join(format!("{}_{:04}.{}", base, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Sibling of `video_path` named `{stem}{suffix}.wav`.
pub fn side_audio_path(video_path: &Path, suffix: &str) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string());

    video_path.with_file_name(format!("{}{}.{}", stem, suffix, SIDE_AUDIO_EXTENSION))
}
