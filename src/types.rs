//! Type definitions for skyswoop
//!
//! Source of truth for all data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Video Types
// ============================================

/// Preview metadata for one post, produced by the metadata generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: String,
    pub url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub author: Option<String>,
    /// Formatted as "M:SS"
    pub duration: Option<String>,
}

/// Identifiers pulled out of a post URL; empty when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRef {
    pub username: String,
    pub post_id: String,
}

/// Container format of the downloaded file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    #[default]
    Mp4,
    Webm,
    Avi,
}

impl VideoFormat {
    pub const ALL: [VideoFormat; 3] = [VideoFormat::Mp4, VideoFormat::Webm, VideoFormat::Avi];

    pub fn as_str(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Webm => "webm",
            VideoFormat::Avi => "avi",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "video/mp4",
            VideoFormat::Webm => "video/webm",
            VideoFormat::Avi => "video/x-msvideo",
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical resolution of the downloaded file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
pub enum VideoQuality {
    #[serde(rename = "360p")]
    #[value(name = "360p")]
    P360,
    #[serde(rename = "480p")]
    #[value(name = "480p")]
    P480,
    #[default]
    #[serde(rename = "720p")]
    #[value(name = "720p")]
    P720,
    #[serde(rename = "1080p")]
    #[value(name = "1080p")]
    P1080,
}

impl VideoQuality {
    pub const ALL: [VideoQuality; 4] = [
        VideoQuality::P360,
        VideoQuality::P480,
        VideoQuality::P720,
        VideoQuality::P1080,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VideoQuality::P360 => "360p",
            VideoQuality::P480 => "480p",
            VideoQuality::P720 => "720p",
            VideoQuality::P1080 => "1080p",
        }
    }

    /// Nominal bitrate in megabits per second
    pub fn bitrate_mbps(self) -> f64 {
        match self {
            VideoQuality::P1080 => 5.0,
            VideoQuality::P720 => 2.5,
            VideoQuality::P480 => 1.2,
            VideoQuality::P360 => 0.7,
        }
    }

    /// Rough size range shown before downloading
    pub fn estimated_size(self) -> &'static str {
        match self {
            VideoQuality::P1080 => "15-25MB",
            VideoQuality::P720 => "8-15MB",
            VideoQuality::P480 => "5-8MB",
            VideoQuality::P360 => "2-5MB",
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// History Types
// ============================================

/// A completed download, persisted newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub format: VideoFormat,
    pub quality: VideoQuality,
    /// ISO-8601, UTC
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

// ============================================
// Download Types
// ============================================

/// Placeholder file content produced by the artifact generator
#[derive(Debug, Clone)]
pub struct MockArtifact {
    pub format: VideoFormat,
    pub quality: VideoQuality,
    pub bytes: Vec<u8>,
}

impl MockArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

/// Result of a finished simulated download
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub path: std::path::PathBuf,
    pub bytes_written: usize,
    pub record: DownloadRecord,
}

// ============================================
// Config Types
// ============================================

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where artifacts are written (empty = platform download dir)
    pub download_dir: String,
    pub default_format: VideoFormat,
    pub default_quality: VideoQuality,
    /// Max history entries (default: 50)
    pub max_history_entries: usize,
    /// Simulated metadata fetch latency
    pub processing_delay_ms: u64,
    /// Simulated download latency
    pub download_delay_ms: u64,
    /// Editor command (default: "nvim")
    pub editor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: String::new(), // Set at runtime to ~/Downloads
            default_format: VideoFormat::default(),
            default_quality: VideoQuality::default(),
            max_history_entries: 50,
            processing_delay_ms: 1000,
            download_delay_ms: 1500,
            editor: "nvim".into(),
        }
    }
}

// ============================================
// CLI / Selector Types
// ============================================

/// Item displayed in selector menu
#[derive(Debug, Clone)]
pub struct MenuItem<T> {
    /// Display text
    pub label: String,
    /// Underlying value
    pub value: T,
}

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Ask for a URL
    Init,
    /// Validate the URL and fetch preview metadata
    Process,
    /// Simulate the download of the previewed post
    Download,
    /// Process a list of URLs one after another
    Batch,
    /// Print download history
    History,
    /// Write history as CSV
    Export,
    /// Wipe download history
    Clear,
    /// Exit application
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_layout() {
        let record = DownloadRecord {
            id: "xyz".into(),
            title: "Hello".into(),
            url: "https://bsky.app/profile/a/post/xyz".into(),
            format: VideoFormat::Webm,
            quality: VideoQuality::P1080,
            date: "2026-01-01T00:00:00.000Z".into(),
            author: None,
            thumbnail_url: Some("https://cdn.example/t.jpg".into()),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["format"], "webm");
        assert_eq!(json["quality"], "1080p");
        assert_eq!(json["thumbnailUrl"], "https://cdn.example/t.jpg");
        assert!(json.get("author").is_none());
    }

    #[test]
    fn test_record_without_extras_parses() {
        let raw = r#"{"id":"1","title":"t","url":"u","format":"avi","quality":"360p","date":"d"}"#;
        let record: DownloadRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.format, VideoFormat::Avi);
        assert_eq!(record.quality, VideoQuality::P360);
        assert_eq!(record.author, None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"default_quality":"480p"}"#).unwrap();
        assert_eq!(cfg.default_quality, VideoQuality::P480);
        assert_eq!(cfg.max_history_entries, 50);
        assert_eq!(cfg.download_delay_ms, 1500);
    }
}
