//! Video metadata captured before and after encoding.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Raw numeric properties read from a video file by the prober.
///
/// A successful probe may still report zeros (e.g. a stream without a
/// frame rate); failing to open the file is reported separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoProbe {
    /// Frames per second (0.0 if unknown).
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub frame_count: u64,
    /// Bits per second as reported by the container/stream (0.0 if unknown).
    pub bitrate: f64,
}

/// Measurements of one video file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub fps: f64,
    pub frame_count: u64,
    /// Seconds, `frame_count / fps`, or 0 when fps is 0.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoMetadata {
    /// Derive metadata from a probe, guarding the duration against fps == 0.
    pub fn from_probe(probe: &VideoProbe) -> Self {
        Self {
            fps: probe.fps,
            frame_count: probe.frame_count,
            duration: duration_secs(probe.frame_count, probe.fps),
            width: probe.width,
            height: probe.height,
        }
    }

    fn insert_into(&self, prefix: &str, map: &mut Map<String, Value>) {
        map.insert(format!("{}_fps", prefix), json!(self.fps));
        map.insert(format!("{}_frame_count", prefix), json!(self.frame_count));
        map.insert(format!("{}_duration", prefix), json!(self.duration));
        map.insert(format!("{}_width", prefix), json!(self.width));
        map.insert(format!("{}_height", prefix), json!(self.height));
    }
}

/// Duration in seconds for a frame count at a frame rate.
pub fn duration_secs(frame_count: u64, fps: f64) -> f64 {
    if fps > 0.0 && fps.is_finite() {
        frame_count as f64 / fps
    } else {
        0.0
    }
}

/// Source and produced-file measurements, exposed side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub source: VideoMetadata,
    pub loaded: VideoMetadata,
}

impl VideoInfo {
    /// Flatten into the `source_*` / `loaded_*` mapping handed to the host.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        self.source.insert_into("source", &mut map);
        self.loaded.insert_into("loaded", &mut map);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fps_gives_zero_duration() {
        let probe = VideoProbe {
            fps: 0.0,
            frame_count: 120,
            ..Default::default()
        };
        assert_eq!(VideoMetadata::from_probe(&probe).duration, 0.0);
    }

    #[test]
    fn duration_from_frames() {
        let probe = VideoProbe {
            fps: 25.0,
            frame_count: 250,
            width: 1920,
            height: 1080,
            bitrate: 0.0,
        };
        let meta = VideoMetadata::from_probe(&probe);
        assert!((meta.duration - 10.0).abs() < 1e-9);
        assert_eq!(meta.width, 1920);
    }

    #[test]
    fn map_has_all_ten_keys() {
        let info = VideoInfo::default();
        let map = info.to_map();
        assert_eq!(map.len(), 10);
        for key in [
            "source_fps",
            "source_frame_count",
            "source_duration",
            "source_width",
            "source_height",
            "loaded_fps",
            "loaded_frame_count",
            "loaded_duration",
            "loaded_width",
            "loaded_height",
        ] {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }
}
