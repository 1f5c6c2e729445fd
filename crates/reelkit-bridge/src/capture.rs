use std::path::PathBuf;

/// Frontend-facing summary of one finished recording.
///
/// The encoded bytes themselves stay in the backend (for the optional
/// convert-and-store upload); the UI only needs this digest.
#[derive(Debug, Clone)]
pub struct ClipSummary {
    /// Suggested filename of the clip, `recording-<timestamp>.<ext>`.
    pub file_name: String,
    /// Human-readable label of the container/codec combination used.
    pub format_label: String,
    /// Size of the finished clip in bytes.
    pub size_bytes: u64,
    /// Recorded duration in wall-clock seconds.
    pub duration_seconds: f64,
    /// Where the clip was written in the downloads directory, if the local
    /// save succeeded.
    pub saved_to: Option<PathBuf>,
}
