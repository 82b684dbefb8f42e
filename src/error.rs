use std::path::PathBuf;
use thiserror::Error;

/// Failures confined to the preview pane; each one is shown as a message.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("File too large to preview: {path} ({size} bytes, limit {limit} bytes)")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("{path} is not valid UTF-8 text")]
    NotText { path: PathBuf },
    #[error("Unable to load image {path}: {reason}")]
    Image { path: PathBuf, reason: String },
    #[error("Unable to open video {path}: {reason}")]
    VideoOpen { path: PathBuf, reason: String },
    #[error("Unable to read video frame: {0}")]
    VideoRead(String),
    #[error("Unable to read archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("Unable to list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
