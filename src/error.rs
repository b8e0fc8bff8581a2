//! Error types for skyswoop

use thiserror::Error;

/// Stable error codes, one per failure family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // User errors
    InvalidUrl,
    NoValidUrls,
    BatchFull,
    NothingToExport,
    NoSelection,
    InvalidConfig,

    // Simulation errors
    DownloadFailed,

    // System errors
    FileError,
    StorageError,
    SpawnError,
}

/// Why a post URL was rejected before any processing started
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Please enter a valid Bluesky URL")]
    Empty,

    #[error("Please enter a valid Bluesky post URL (should contain bsky.app)")]
    WrongHost,

    #[error("URL should be in the format: https://bsky.app/profile/username/post/postid")]
    WrongShape,
}

/// Main error type for skyswoop
#[derive(Error, Debug)]
pub enum SkyswoopError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("No valid URLs. Please enter at least one valid Bluesky URL")]
    NoValidUrls,

    #[error("You can only process up to {0} URLs at once")]
    BatchFull(usize),

    #[error("No history to export")]
    NothingToExport,

    #[error("No selection made")]
    NoSelection,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to spawn process: {0}")]
    Spawn(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SkyswoopError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidUrl(_) => ErrorCode::InvalidUrl,
            Self::NoValidUrls => ErrorCode::NoValidUrls,
            Self::BatchFull(_) => ErrorCode::BatchFull,
            Self::NothingToExport => ErrorCode::NothingToExport,
            Self::NoSelection => ErrorCode::NoSelection,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::DownloadFailed(_) => ErrorCode::DownloadFailed,
            Self::File(_) => ErrorCode::FileError,
            Self::Storage(_) => ErrorCode::StorageError,
            Self::Spawn(_) => ErrorCode::SpawnError,
            Self::Json(_) => ErrorCode::StorageError,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkyswoopError>;
