use std::path::PathBuf;

use reelkit_capture::recorder::Recorder;

/// The finished recording retained for a later convert-and-store upload.
#[derive(Debug)]
pub struct RetainedClip {
    /// Encoded container bytes of the clip.
    pub bytes: Vec<u8>,
    /// Filename the clip was announced under.
    pub file_name: String,
    /// MIME type of the clip's container.
    pub mime_type: &'static str,
}

/// The core application state that holds configuration, the HTTP client, and
/// the capture session.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application. It is designed to be wrapped in thread-safe,
/// async-friendly concurrency primitives (see [`SharedState`]) to allow safe
/// concurrent reads and occasional writes from multiple tasks.
pub struct State {
    /// The loaded application configuration.
    pub config: reelkit_bridge::config::Config,
    /// Platform download directory used when the configuration does not
    /// override it.
    pub fallback_downloads_dir: PathBuf,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// The single capture session owner; `None` until ffmpeg has been found.
    pub recorder: Option<Recorder>,
    /// The most recent finished recording, kept for uploading.
    pub last_clip: Option<RetainedClip>,
}

impl State {
    /// Directory finished recordings, fetched media and processed videos
    /// are written to.
    pub fn downloads_dir(&self) -> PathBuf {
        self.config
            .downloads_dir
            .clone()
            .unwrap_or_else(|| self.fallback_downloads_dir.clone())
    }
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
