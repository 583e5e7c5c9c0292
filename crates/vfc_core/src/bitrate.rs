//! Quality slider to video bitrate mapping.
//!
//! Linear interpolation between a 10000 kbps ceiling at quality 1 and a
//! 100 kbps floor at quality 40.

/// Quality value that maps to the ceiling bitrate.
pub const MIN_QUALITY: u32 = 1;
/// Quality value that maps to the floor bitrate.
pub const MAX_QUALITY: u32 = 40;
/// Floor bitrate in kbps (quality 40).
pub const MIN_BITRATE_KBPS: u32 = 100;
/// Ceiling bitrate in kbps (quality 1).
pub const MAX_BITRATE_KBPS: u32 = 10000;

/// Target video bitrate in kbps for a quality slider value.
///
/// `(max_bitrate - min_bitrate) / (min_quality - max_quality) * (quality -
/// min_quality) + max_bitrate`, truncated toward zero. Evaluated on integers
/// scaled by the quality span so the endpoints come out exact. Values past
/// 40 extrapolate and saturate at 0; callers validate the range first.
pub fn calculate_bitrate(quality: u32) -> u32 {
    let span = i64::from(MAX_QUALITY - MIN_QUALITY);
    let drop = i64::from(MAX_BITRATE_KBPS - MIN_BITRATE_KBPS);
    let steps = i64::from(quality) - i64::from(MIN_QUALITY);

    let scaled = i64::from(MAX_BITRATE_KBPS) * span - drop * steps;
    (scaled / span).max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(calculate_bitrate(1), 10000);
        assert_eq!(calculate_bitrate(40), 100);
    }

    #[test]
    fn truncates_between_steps() {
        // 10000 - 9900 * 9 / 39 = 7715.38...
        assert_eq!(calculate_bitrate(10), 7715);
        // 10000 - 9900 * 4 / 39 = 8984.61...
        assert_eq!(calculate_bitrate(5), 8984);
    }

    #[test]
    fn non_increasing_over_domain() {
        let mut prev = calculate_bitrate(1);
        for q in 2..=40 {
            let current = calculate_bitrate(q);
            assert!(current <= prev, "bitrate rose at quality {}", q);
            prev = current;
        }
    }

    #[test]
    fn saturates_past_the_floor() {
        assert_eq!(calculate_bitrate(1000), 0);
    }
}
