use std::path::PathBuf;

/// Progress of the media file currently being streamed to disk.
#[derive(Debug, Clone)]
pub struct ActiveTransfer {
    pub filename: String,
    pub downloaded_bytes: u64,
    /// Zero when the service did not announce a length.
    pub total_bytes: u64,
}

/// A media file that finished downloading this session.
#[derive(Debug, Clone)]
pub struct CompletedDownload {
    pub filename: String,
    pub saved_to: PathBuf,
}

/// Per-session state of by-filename media downloads.
#[derive(Debug, Clone, Default)]
pub struct DownloadsEntity {
    /// The transfer currently in flight, if any.
    pub active: Option<ActiveTransfer>,
    /// Files downloaded since the application started, newest last.
    pub completed: Vec<CompletedDownload>,
}
