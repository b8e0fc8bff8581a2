//! Mock artifact generator
//!
//! Produces zero-filled placeholder content whose size looks plausible for the
//! chosen quality and duration. The bytes are not playable media.

use crate::types::{MockArtifact, VideoFormat, VideoQuality};
use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on generated content, in MB
pub const MAX_ARTIFACT_MB: f64 = 4.0;

/// Duration assumed when the preview has none (or an unreadable one)
pub const DEFAULT_DURATION_SECS: u32 = 30;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Invalid regex"));

/// Size in MB: `bitrate * duration / 8`, capped at [`MAX_ARTIFACT_MB`]
pub fn artifact_size_mb(quality: VideoQuality, duration_secs: u32) -> f64 {
    (quality.bitrate_mbps() * f64::from(duration_secs) / 8.0).min(MAX_ARTIFACT_MB)
}

pub fn artifact_size_bytes(quality: VideoQuality, duration_secs: u32) -> usize {
    (artifact_size_mb(quality, duration_secs) * BYTES_PER_MB).round() as usize
}

/// Allocate the placeholder buffer for a download
pub fn generate_artifact(
    format: VideoFormat,
    quality: VideoQuality,
    duration_secs: u32,
) -> MockArtifact {
    let size = artifact_size_bytes(quality, duration_secs);
    tracing::debug!(
        %format,
        %quality,
        size_mb = size as f64 / BYTES_PER_MB,
        "generating mock video"
    );

    MockArtifact {
        format,
        quality,
        bytes: vec![0; size],
    }
}

/// Turn an "M:SS" duration into seconds
pub fn parse_duration(duration: Option<&str>) -> u32 {
    let Some(duration) = duration else {
        return DEFAULT_DURATION_SECS;
    };

    let parsed = duration.split_once(':').and_then(|(m, s)| {
        let minutes: u32 = m.trim().parse().ok()?;
        let seconds: u32 = s.trim().parse().ok()?;
        minutes.checked_mul(60)?.checked_add(seconds)
    });

    parsed.unwrap_or(DEFAULT_DURATION_SECS)
}

/// File name for a download, e.g. `my_cat___720p.mp4`
pub fn artifact_filename(title: &str, quality: VideoQuality, format: VideoFormat) -> String {
    let base = if title.is_empty() { "bluesky_video" } else { title };
    let stem = UNSAFE_CHARS.replace_all(base, "_").to_lowercase();
    format!("{}_{}.{}", stem, quality, format)
}
