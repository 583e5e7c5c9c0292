//! Request checks that run before anything touches the filesystem.

use std::path::PathBuf;

use crate::models::{TranscodeRequest, MAX_QUALITY_VALUE, MIN_QUALITY_VALUE};
use crate::paths::normalize_separators;

use super::errors::{TranscodeError, TranscodeResult};
use super::types::ProcessOptions;

/// The source must be named and must be an existing file.
pub fn validate_source(request: &TranscodeRequest) -> TranscodeResult<PathBuf> {
    if request.video_path.trim().is_empty() {
        return Err(TranscodeError::invalid_input("no video file was given"));
    }

    let source = PathBuf::from(normalize_separators(&request.video_path));
    if !source.is_file() {
        return Err(TranscodeError::invalid_input(format!(
            "video file {} does not exist",
            source.display()
        )));
    }
    Ok(source)
}

/// Output directory and file name must both be set.
pub fn validate_output_location(request: &TranscodeRequest) -> TranscodeResult<PathBuf> {
    if request.output_path.trim().is_empty() {
        return Err(TranscodeError::configuration("output directory is not set"));
    }
    if request.output_filename.trim().is_empty() {
        return Err(TranscodeError::configuration("output file name is not set"));
    }
    Ok(PathBuf::from(normalize_separators(&request.output_path)))
}

/// Quality range, frame size, then (if enabled) the codec/container
/// whitelist.
pub fn validate_encoding(
    request: &TranscodeRequest,
    options: &ProcessOptions,
) -> TranscodeResult<()> {
    if !(MIN_QUALITY_VALUE..=MAX_QUALITY_VALUE).contains(&request.video_quality) {
        return Err(TranscodeError::invalid_input(format!(
            "video quality {} is outside {}..={}",
            request.video_quality, MIN_QUALITY_VALUE, MAX_QUALITY_VALUE
        )));
    }

    if let Some((field, value)) = request.invalid_dimensions().first() {
        return Err(TranscodeError::invalid_input(format!(
            "{} {} must be a positive pixel count or -1/-2",
            field, value
        )));
    }

    if options.strict_codec_check && !request.video_format.supports(request.codec) {
        let allowed: Vec<String> = request
            .video_format
            .supported_codecs()
            .iter()
            .map(|c| c.to_string())
            .collect();
        return Err(TranscodeError::invalid_input(format!(
            "{} cannot be stored in {} (supported: {})",
            request.codec,
            request.video_format,
            allowed.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::models::{Container, VideoCodec};
    use crate::orchestrator::errors::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn empty_source_is_rejected() {
        let err = validate_source(&TranscodeRequest::new("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn missing_source_is_rejected() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.mov");
        let err = validate_source(&TranscodeRequest::new(missing.to_string_lossy())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn directory_is_not_a_source() {
        let dir = tempdir().unwrap();
        let err =
            validate_source(&TranscodeRequest::new(dir.path().to_string_lossy())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn existing_source_passes() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("clip.mov");
        fs::write(&source, b"").unwrap();
        let path = validate_source(&TranscodeRequest::new(source.to_string_lossy())).unwrap();
        assert_eq!(path, source);
    }

    #[test]
    fn output_location_checked_in_order() {
        let request = TranscodeRequest::new("clip.mov");
        let err = validate_output_location(&request).unwrap_err();
        assert!(err.to_string().contains("directory"));

        let request = TranscodeRequest::new("clip.mov").with_output("/out", "");
        let err = validate_output_location(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("file name"));
    }

    #[test]
    fn output_dir_separators_normalized() {
        let request = TranscodeRequest::new("clip.mov").with_output("renders\\today", "clip");
        let dir = validate_output_location(&request).unwrap();
        assert_eq!(dir, PathBuf::from("renders/today"));
    }

    #[test]
    fn quality_bounds() {
        let options = ProcessOptions::default();
        let mut request = TranscodeRequest::new("clip.mov");
        for quality in [1, 10, 40] {
            request.video_quality = quality;
            assert!(validate_encoding(&request, &options).is_ok());
        }
        for quality in [0, 41] {
            request.video_quality = quality;
            let err = validate_encoding(&request, &options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InputValidation);
        }
    }

    #[test]
    fn frame_size_must_be_usable() {
        let options = ProcessOptions::default();
        let mut request = TranscodeRequest::new("clip.mov");

        request.video_width = 0;
        let err = validate_encoding(&request, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
        assert!(err.to_string().contains("video_width 0"));

        request.video_width = -2;
        request.video_height = -7;
        let err = validate_encoding(&request, &options).unwrap_err();
        assert!(err.to_string().contains("video_height -7"));

        request.video_height = -1;
        assert!(validate_encoding(&request, &options).is_ok());
    }

    #[test]
    fn whitelist_only_when_strict() {
        let mut request = TranscodeRequest::new("clip.mov");
        request.video_format = Container::Avi;
        request.codec = VideoCodec::Hevc;

        assert!(validate_encoding(&request, &ProcessOptions::default()).is_ok());

        let strict = ProcessOptions {
            strict_codec_check: true,
            ..ProcessOptions::default()
        };
        let err = validate_encoding(&request, &strict).unwrap_err();
        assert!(err.to_string().contains("avi"));

        request.video_format = Container::Mkv;
        assert!(validate_encoding(&request, &strict).is_ok());
    }
}
