use reelkit_bridge::capture::ClipSummary;
use reelkit_bridge::remote::RemoteLinks;

/// Explicit lifecycle of the capture session as the UI sees it.
#[derive(Debug, Clone, Default)]
pub enum RecorderPhase {
    /// No session; ready to start.
    #[default]
    Idle,
    /// A session is recording; updated by progress events.
    Recording {
        recorded_bytes: u64,
        elapsed_seconds: f64,
    },
    /// The last session finished and produced this clip.
    Finished { clip: ClipSummary },
}

/// Per-component state of the recorder page: the capture lifecycle plus the
/// convert-and-store upload of the finished clip.
#[derive(Debug, Clone, Default)]
pub struct RecorderEntity {
    pub phase: RecorderPhase,
    /// Label of the negotiated recording format, once a session started.
    pub format_label: Option<String>,
    /// A start request is outstanding.
    pub start_pending: bool,
    /// A stop request is outstanding.
    pub stop_pending: bool,
    /// The last capture failure, shown inline.
    pub error: Option<String>,

    /// A convert-and-store upload is outstanding.
    pub store_pending: bool,
    /// References of the stored clip after a successful upload.
    pub stored: Option<RemoteLinks>,
    /// The last upload failure, shown inline.
    pub store_error: Option<String>,
}

impl RecorderEntity {
    /// Whether the capture session is currently recording.
    pub fn is_recording(&self) -> bool {
        matches!(self.phase, RecorderPhase::Recording { .. })
    }

    /// The finished clip, when the last session produced one.
    pub fn finished_clip(&self) -> Option<&ClipSummary> {
        match &self.phase {
            RecorderPhase::Finished { clip } => Some(clip),
            _ => None,
        }
    }
}
