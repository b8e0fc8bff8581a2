//! Batch URL entry and sequential processing

use crate::core::downloader::Downloader;
use crate::core::metadata::MetadataGenerator;
use crate::core::parser::{is_batch_candidate, validate_post_url};
use crate::core::random::RandomSource;
use crate::error::{Result, SkyswoopError};
use crate::storage::backend::Storage;
use crate::storage::history::DownloadHistory;
use crate::types::{DownloadOutcome, VideoFormat, VideoQuality};
use tracing::warn;

/// Most URLs accepted in one batch
pub const MAX_BATCH_URLS: usize = 5;

/// Split pasted text on newlines and commas, keeping at most [`MAX_BATCH_URLS`]
pub fn split_bulk_text(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .take(MAX_BATCH_URLS)
        .map(String::from)
        .collect()
}

/// URLs queued for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchQueue {
    urls: Vec<String>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with URLs pasted as one block of text
    pub fn from_text(text: &str) -> Self {
        Self {
            urls: split_bulk_text(text),
        }
    }

    /// Queue URLs given one by one; fails once more than [`MAX_BATCH_URLS`] are given
    pub fn from_urls<I, U>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        let mut queue = Self::new();
        for url in urls {
            queue.add(url)?;
        }
        Ok(queue)
    }

    pub fn add(&mut self, url: impl Into<String>) -> Result<()> {
        if self.urls.len() >= MAX_BATCH_URLS {
            return Err(SkyswoopError::BatchFull(MAX_BATCH_URLS));
        }
        self.urls.push(url.into());
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.urls.len()).then(|| self.urls.remove(index))
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Queued URLs that look like Bluesky links
    pub fn eligible(&self) -> Result<Vec<String>> {
        let valid: Vec<String> = self
            .urls
            .iter()
            .filter(|url| is_batch_candidate(url))
            .cloned()
            .collect();

        if valid.is_empty() {
            return Err(SkyswoopError::NoValidUrls);
        }
        Ok(valid)
    }
}

/// Outcome for one URL of a batch
#[derive(Debug)]
pub struct BatchItem {
    pub url: String,
    pub result: Result<DownloadOutcome>,
}

/// Preview and download each URL in order.
///
/// A failing URL is recorded in its [`BatchItem`] and the batch moves on.
pub async fn run_batch<R: RandomSource, S: Storage>(
    urls: &[String],
    generator: &mut MetadataGenerator<R>,
    downloader: &Downloader,
    format: VideoFormat,
    quality: VideoQuality,
    history: &mut DownloadHistory<S>,
) -> Vec<BatchItem> {
    let mut items = Vec::with_capacity(urls.len());

    for url in urls {
        let result = match validate_post_url(url) {
            Ok(()) => {
                let video = generator.fetch_video_info(url).await;
                downloader.download(&video, format, quality, history).await
            }
            Err(e) => Err(e.into()),
        };

        if let Err(ref e) = result {
            warn!(url = %url, error = %e, "batch item failed");
        }

        items.push(BatchItem {
            url: url.clone(),
            result,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;
    use crate::error::UrlError;
    use crate::storage::backend::MemoryStorage;
    use crate::storage::history::MAX_HISTORY_ENTRIES;
    use std::time::Duration;

    #[test]
    fn test_split_bulk_text() {
        let urls = split_bulk_text(" a ,b\n\n c,,d\ne,f,g ");
        assert_eq!(urls, vec!["a", "b", "c", "d", "e"]);
        assert!(split_bulk_text(" \n , ").is_empty());
    }

    #[test]
    fn test_queue_limit() {
        let mut queue = BatchQueue::new();
        for n in 0..MAX_BATCH_URLS {
            queue.add(format!("https://bsky.app/{}", n)).unwrap();
        }
        assert!(matches!(
            queue.add("one more"),
            Err(SkyswoopError::BatchFull(5))
        ));

        assert_eq!(queue.remove(0).as_deref(), Some("https://bsky.app/0"));
        assert_eq!(queue.remove(10), None);
        assert_eq!(queue.urls().len(), 4);
    }

    #[test]
    fn test_from_urls() {
        let urls: Vec<String> = (0..MAX_BATCH_URLS)
            .map(|n| format!("https://bsky.app/profile/a/post/{}", n))
            .collect();
        let queue = BatchQueue::from_urls(urls.clone()).unwrap();
        assert_eq!(queue.urls(), urls.as_slice());

        let mut too_many = urls;
        too_many.push("https://bsky.app/profile/a/post/extra".into());
        assert!(matches!(
            BatchQueue::from_urls(too_many),
            Err(SkyswoopError::BatchFull(MAX_BATCH_URLS))
        ));
    }

    #[test]
    fn test_eligible() {
        let queue = BatchQueue::from_text("https://example.com/x\nhttps://bsky.app/profile/a/post/b");
        assert_eq!(
            queue.eligible().unwrap(),
            vec!["https://bsky.app/profile/a/post/b"]
        );

        let queue = BatchQueue::from_text("https://example.com/x");
        assert!(matches!(queue.eligible(), Err(SkyswoopError::NoValidUrls)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator =
            MetadataGenerator::new(SeededRandom::from_seed(9), Duration::from_millis(1000));
        let downloader = Downloader::new(dir.path(), Duration::from_millis(1500));
        let mut history = DownloadHistory::new(MemoryStorage::new(), MAX_HISTORY_ENTRIES);

        let urls = vec![
            "https://bsky.app/profile/alice/post/one".to_string(),
            "https://bsky.app/profile/alice".to_string(),
            "https://bsky.app/profile/bob/post/two".to_string(),
        ];

        let items = run_batch(
            &urls,
            &mut generator,
            &downloader,
            VideoFormat::Mp4,
            VideoQuality::P480,
            &mut history,
        )
        .await;

        assert_eq!(items.len(), 3);
        assert!(items[0].result.is_ok());
        assert!(matches!(
            items[1].result,
            Err(SkyswoopError::InvalidUrl(UrlError::WrongShape))
        ));
        assert!(items[2].result.is_ok());

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].id, "two");
        assert_eq!(history.entries()[1].id, "one");
    }
}
