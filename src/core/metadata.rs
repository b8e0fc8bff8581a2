//! Mock metadata generator
//!
//! Stands in for a real API lookup: waits a fixed latency, then fabricates a
//! preview from small fixed pools. It never fails.

use crate::core::parser::parse_post_url;
use crate::core::random::RandomSource;
use crate::types::VideoInfo;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const THUMBNAILS: [&str; 3] = [
    "https://cdn.bsky.app/img/feed_thumbnail/plain/did:plc:z72i7hdynmk6r22z27h6tvur/bafkreietfs43th3byxca44uq4a5qkgmrr7qjvvgrzefoe76wfaa6k5mknm@jpeg",
    "https://cdn.bsky.app/img/feed_thumbnail/plain/did:plc:ewvi7nxzyoun6zhxrhs64oiz/bafkreiedzzj6ky4xvlt5n6uyozsnthfkdgsowr34wz3xm224vn44koo44m@jpeg",
    "https://cdn.bsky.app/img/feed_thumbnail/plain/did:plc:wqowuobmc2ihbfq7pz5obsed/bafkreihag3lrmyresyplpgzervg5vecwijiznicg5zlw5zvw7gntdgmseu@jpeg",
];

const AUTHORS: [&str; 6] = [
    "alice.bsky.social",
    "bob.bsky.social",
    "carol.bsky.social",
    "dave.bsky.social",
    "bluesky.bsky.social",
    "videos.bsky.social",
];

const TITLES: [&str; 6] = [
    "Amazing sunset at the beach 🌅",
    "My cat doing something funny 😂",
    "This view from my hike today!",
    "Concert highlights from last night 🎵",
    "How to make the perfect pizza 🍕",
    "Travel vlog: exploring the city",
];

/// Shortest and longest (exclusive) fabricated duration, in seconds
const MIN_DURATION_SECS: u32 = 30;
const MAX_DURATION_SECS: u32 = 180;

/// Length of the id invented when the URL carries no post id
const FALLBACK_ID_LEN: usize = 8;

/// Format seconds as "M:SS"
pub fn format_duration(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Fabricates [`VideoInfo`] records after a simulated round trip
pub struct MetadataGenerator<R: RandomSource> {
    rng: R,
    latency: Duration,
}

impl<R: RandomSource> MetadataGenerator<R> {
    pub fn new(rng: R, latency: Duration) -> Self {
        Self { rng, latency }
    }

    /// Wait out the simulated latency, then build the preview.
    /// `url` is expected to have passed validation already.
    pub async fn fetch_video_info(&mut self, url: &str) -> VideoInfo {
        debug!(url, latency_ms = self.latency.as_millis() as u64, "fetching video info");
        sleep(self.latency).await;
        self.generate(url)
    }

    /// Build a preview immediately, without the latency
    pub fn generate(&mut self, url: &str) -> VideoInfo {
        let post = parse_post_url(url);

        let thumbnail = THUMBNAILS[self.rng.pick_index(THUMBNAILS.len())];
        let fallback_author = AUTHORS[self.rng.pick_index(AUTHORS.len())];
        let title = TITLES[self.rng.pick_index(TITLES.len())];
        let duration = self.rng.range(MIN_DURATION_SECS, MAX_DURATION_SECS);

        let id = if post.post_id.is_empty() {
            self.rng.token(FALLBACK_ID_LEN)
        } else {
            post.post_id
        };

        let author = if post.username.is_empty() {
            fallback_author.to_string()
        } else {
            post.username
        };

        VideoInfo {
            id,
            url: url.to_string(),
            thumbnail_url: thumbnail.to_string(),
            title: title.to_string(),
            author: Some(author),
            duration: Some(format_duration(duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededRandom;
    use std::time::Instant;

    /// Always returns the same draws
    struct Fixed {
        index: usize,
        value: u32,
    }

    impl RandomSource for Fixed {
        fn pick_index(&mut self, len: usize) -> usize {
            self.index % len
        }

        fn range(&mut self, _low: u32, _high: u32) -> u32 {
            self.value
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "0:30");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(179), "2:59");
    }

    #[test]
    fn test_generate_uses_url_parts() {
        let mut generator = MetadataGenerator::new(Fixed { index: 1, value: 95 }, Duration::ZERO);
        let info = generator.generate("https://bsky.app/profile/alice/post/xyz123");

        assert_eq!(info.id, "xyz123");
        assert_eq!(info.author.as_deref(), Some("alice"));
        assert_eq!(info.title, TITLES[1]);
        assert_eq!(info.thumbnail_url, THUMBNAILS[1]);
        assert_eq!(info.duration.as_deref(), Some("1:35"));
        assert_eq!(info.url, "https://bsky.app/profile/alice/post/xyz123");
    }

    #[test]
    fn test_generate_fallbacks() {
        let mut generator = MetadataGenerator::new(Fixed { index: 2, value: 30 }, Duration::ZERO);
        let info = generator.generate("https://bsky.app/");

        assert_eq!(info.author.as_deref(), Some(AUTHORS[2]));
        assert_eq!(info.id.len(), FALLBACK_ID_LEN);
        assert!(!info.id.is_empty());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let url = "https://bsky.app/profile/bob/post/1";
        let a = MetadataGenerator::new(SeededRandom::from_seed(42), Duration::ZERO).generate(url);
        let b = MetadataGenerator::new(SeededRandom::from_seed(42), Duration::ZERO).generate(url);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duration_range() {
        let mut generator = MetadataGenerator::new(SeededRandom::from_seed(3), Duration::ZERO);
        for _ in 0..200 {
            let info = generator.generate("https://bsky.app/profile/a/post/b");
            let duration = info.duration.unwrap();
            let (m, s) = duration.split_once(':').unwrap();
            assert_eq!(s.len(), 2);
            let secs: u32 = m.parse::<u32>().unwrap() * 60 + s.parse::<u32>().unwrap();
            assert!((30..180).contains(&secs));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let mut generator =
            MetadataGenerator::new(SeededRandom::from_seed(1), Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        let wall = Instant::now();

        let info = generator
            .fetch_video_info("https://bsky.app/profile/alice/post/xyz123")
            .await;

        assert_eq!(info.id, "xyz123");
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(wall.elapsed() < Duration::from_millis(1000));
    }
}
