//! Download history management

use crate::error::{Result, SkyswoopError};
use crate::storage::backend::Storage;
use crate::types::DownloadRecord;
use std::path::Path;
use tokio::fs;
use tracing::warn;

/// Storage key holding the JSON array of records
pub const HISTORY_KEY: &str = "downloadHistory";

/// Default cap on remembered downloads
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Default file name for CSV exports
pub const EXPORT_FILE_NAME: &str = "skyswoop_history.csv";

const CSV_HEADER: &str = "Title,URL,Format,Quality,Date";

/// History manager, newest record first
pub struct DownloadHistory<S: Storage> {
    storage: S,
    max_entries: usize,
    entries: Vec<DownloadRecord>,
}

impl<S: Storage> DownloadHistory<S> {
    pub fn new(storage: S, max_entries: usize) -> Self {
        Self {
            storage,
            max_entries,
            entries: Vec::new(),
        }
    }

    /// Load history from storage.
    ///
    /// Unreadable or malformed content leaves the history empty; it is logged,
    /// never returned as an error.
    pub async fn load(&mut self) {
        self.entries = match self.storage.get(HISTORY_KEY).await {
            Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(error = %e, "error parsing download history, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "error reading download history, starting empty");
                Vec::new()
            }
        };
    }

    /// Add a record at the front and persist the most recent entries
    pub async fn append(&mut self, record: DownloadRecord) -> Result<()> {
        self.entries.insert(0, record);
        self.entries.truncate(self.max_entries);
        self.save().await
    }

    async fn save(&self) -> Result<()> {
        let content = serde_json::to_string(&self.entries)?;
        self.storage.set(HISTORY_KEY, &content).await
    }

    /// Get all history entries
    pub fn entries(&self) -> &[DownloadRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear memory and storage
    pub async fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.storage.remove(HISTORY_KEY).await
    }

    /// Render the in-memory history as CSV.
    ///
    /// Returns [`SkyswoopError::NothingToExport`] when there is nothing to render.
    pub fn export_csv(&self) -> Result<String> {
        if self.entries.is_empty() {
            return Err(SkyswoopError::NothingToExport);
        }

        let rows = self.entries.iter().map(|r| {
            format!(
                "\"{}\",\"{}\",{},{},{}",
                r.title.replace('"', "\"\""),
                r.url,
                r.format,
                r.quality,
                r.date
            )
        });

        Ok(std::iter::once(CSV_HEADER.to_string())
            .chain(rows)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Write the CSV export to `path`; nothing is written for an empty history
    pub async fn export_csv_to(&self, path: &Path) -> Result<()> {
        let csv = self.export_csv()?;
        fs::write(path, csv).await?;
        Ok(())
    }
}
