//! Downloader module - simulated download pipeline
//!
//! Waits a fixed latency, writes the placeholder artifact and records the
//! download in history.

use crate::core::artifact::{artifact_filename, generate_artifact, parse_duration};
use crate::error::{Result, SkyswoopError};
use crate::storage::backend::Storage;
use crate::storage::history::DownloadHistory;
use crate::types::{DownloadOutcome, DownloadRecord, VideoFormat, VideoInfo, VideoQuality};
use crate::utils::paths::ensure_dir;
use chrono::{SecondsFormat, Utc};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info};

pub struct Downloader {
    output_dir: PathBuf,
    latency: Duration,
}

impl Downloader {
    pub fn new(output_dir: impl Into<PathBuf>, latency: Duration) -> Self {
        Self {
            output_dir: output_dir.into(),
            latency,
        }
    }

    /// Download a previewed video in the requested format and quality.
    ///
    /// Generation itself cannot fail; writing the file or persisting the
    /// history record can.
    pub async fn download<S: Storage>(
        &self,
        video: &VideoInfo,
        format: VideoFormat,
        quality: VideoQuality,
        history: &mut DownloadHistory<S>,
    ) -> Result<DownloadOutcome> {
        debug!(id = %video.id, %format, %quality, "starting simulated download");
        sleep(self.latency).await;

        let duration_secs = parse_duration(video.duration.as_deref());
        let artifact = generate_artifact(format, quality, duration_secs);

        let path = self
            .output_dir
            .join(artifact_filename(&video.title, quality, format));

        ensure_dir(&self.output_dir)
            .await
            .map_err(|e| SkyswoopError::DownloadFailed(e.to_string()))?;
        fs::write(&path, &artifact.bytes)
            .await
            .map_err(|e| SkyswoopError::DownloadFailed(format!("{}: {}", path.display(), e)))?;

        let record = DownloadRecord {
            id: video.id.clone(),
            title: video.title.clone(),
            url: video.url.clone(),
            format,
            quality,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            author: video.author.clone(),
            thumbnail_url: Some(video.thumbnail_url.clone()),
        };
        history.append(record.clone()).await?;

        info!(path = %path.display(), bytes = artifact.len(), "download complete");

        Ok(DownloadOutcome {
            path,
            bytes_written: artifact.len(),
            record,
        })
    }
}
