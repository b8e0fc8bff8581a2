//! Download history persisted through the file backend

use skyswoop::storage::backend::{FileStorage, Storage};
use skyswoop::storage::history::{DownloadHistory, HISTORY_KEY, MAX_HISTORY_ENTRIES};
use skyswoop::types::{DownloadRecord, VideoFormat, VideoQuality};

fn record(n: usize) -> DownloadRecord {
    DownloadRecord {
        id: n.to_string(),
        title: format!("Clip {}", n),
        url: format!("https://bsky.app/profile/bob/post/{}", n),
        format: VideoFormat::Avi,
        quality: VideoQuality::P480,
        date: "2026-10-18T09:00:00.000Z".into(),
        author: Some("bob".into()),
        thumbnail_url: None,
    }
}

#[tokio::test]
async fn test_fifty_one_appends_persist_fifty() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = DownloadHistory::new(FileStorage::new(dir.path()), MAX_HISTORY_ENTRIES);

    for n in 1..=51 {
        history.append(record(n)).await.unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", HISTORY_KEY))).unwrap();
    let persisted: Vec<DownloadRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), 50);
    assert_eq!(persisted.first().unwrap().id, "51");
    assert_eq!(persisted.last().unwrap().id, "2");

    let mut reloaded = DownloadHistory::new(FileStorage::new(dir.path()), MAX_HISTORY_ENTRIES);
    reloaded.load().await;
    assert_eq!(reloaded.entries(), persisted.as_slice());
}

#[tokio::test]
async fn test_corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    storage.set(HISTORY_KEY, "[{\"id\": 1,").await.unwrap();

    let mut history = DownloadHistory::new(storage, MAX_HISTORY_ENTRIES);
    history.load().await;
    assert!(history.is_empty());

    // Still usable afterwards
    history.append(record(1)).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_clear_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = DownloadHistory::new(FileStorage::new(dir.path()), MAX_HISTORY_ENTRIES);
    history.append(record(1)).await.unwrap();
    history.append(record(2)).await.unwrap();

    history.clear().await.unwrap();
    assert!(history.is_empty());
    assert!(!dir.path().join(format!("{}.json", HISTORY_KEY)).exists());

    let mut reloaded = DownloadHistory::new(FileStorage::new(dir.path()), MAX_HISTORY_ENTRIES);
    reloaded.load().await;
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn test_export_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut history = DownloadHistory::new(FileStorage::new(dir.path()), MAX_HISTORY_ENTRIES);
    history.append(record(1)).await.unwrap();
    history.append(record(2)).await.unwrap();

    let path = dir.path().join("export.csv");
    history.export_csv_to(&path).await.unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("Title,URL,Format,Quality,Date\n\"Clip 2\""));
}
