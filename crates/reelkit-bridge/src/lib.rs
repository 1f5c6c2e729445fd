//! Communication bridge between frontend and backend.
//!
//! This crate holds the message protocol and the domain types shared by the
//! graphical frontend and the asynchronous backend that performs webcam
//! capture, scrape requests, media downloads, and video processing calls
//! against the external services.
//!
//! The flow is command/event shaped:
//! - The frontend sends commands (run a scrape, start a recording, submit
//!   an overlay job).
//! - The backend pushes events (scrape results, capture progress,
//!   notifications).
//!
//! Both directions travel over bounded [`tokio::sync::mpsc`] channels paired
//! up in [`BridgeChannels`], so a slow consumer produces back-pressure
//! instead of unbounded buffering.

pub mod capture;
pub mod config;
pub mod notification;
pub mod overlay;
pub mod remote;
pub mod scrape;

use std::path::PathBuf;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
///
/// These are typically sent in response to frontend requests or to push
/// asynchronous progress/events (e.g., capture progress, notifications).
/// Every request has a terminal `Completed`/`Failed` counterpart so the
/// frontend can clear its per-action pending flag; failures carry the
/// user-facing message and never populate success state.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// A scrape finished and the service returned a normalized result set.
    ScrapeCompleted(Box<scrape::ScrapeOutcome>),
    /// A scrape was rejected client-side or failed on the service.
    ScrapeFailed { message: String },
    /// Listing of files already materialized in a local download folder.
    LocalFolderListResponse(scrape::LocalFolderListing),
    /// Progress of a by-filename media download streamed to disk.
    MediaDownloadProgressUpdate {
        /// Backing filename of the media item being fetched.
        filename: String,
        /// Amount of downloaded bytes to this point.
        downloaded_bytes: u64,
        /// Overall amount of bytes to be downloaded, zero when unknown.
        total_bytes: u64,
    },
    /// A by-filename media download finished and was written to disk.
    MediaDownloadCompleted { filename: String, saved_to: PathBuf },
    /// A by-filename media download failed.
    MediaDownloadFailed { filename: String, message: String },
    /// A capture session started with the negotiated recording format.
    CaptureStartedResponse {
        /// Human-readable label of the selected container/codec combination.
        format_label: String,
    },
    /// Periodic (roughly once per second) capture progress snapshot.
    CaptureProgressUpdate {
        /// Encoded bytes accumulated since the capture started.
        recorded_bytes: u64,
        /// Wall-clock seconds since the capture started.
        elapsed_seconds: f64,
    },
    /// A capture session stopped and produced exactly one finished clip.
    CaptureCompleted(capture::ClipSummary),
    /// A capture session could not be started or died mid-recording. The
    /// session is back in the idle state when this arrives.
    CaptureFailed { message: String },
    /// The retained clip was converted and stored by the media service.
    RecordingStored(remote::RemoteLinks),
    /// Converting/storing the retained clip failed.
    RecordingStoreFailed { message: String },
    /// An overlay job finished, either as a saved file or a stored reference.
    OverlayCompleted(overlay::OverlayOutcome),
    /// An overlay job failed or returned a malformed response.
    OverlayFailed { message: String },
}

/// Commands issued by the frontend to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Request to replace and persist the application configuration.
    UpdateConfigurationRequest(config::Config),
    /// Request to run a scrape with the given filter.
    ScrapeRequest(Box<scrape::ScrapeFilter>),
    /// Request to list files present in a local download folder.
    ListLocalFolderRequest { folder_path: String },
    /// Request to download one scraped media file by its backing filename.
    DownloadMediaRequest { filename: String },
    /// Request to start a webcam/microphone capture session.
    StartCaptureRequest,
    /// Request to stop the active capture session and finalize the clip.
    StopCaptureRequest,
    /// Request to convert the retained clip and store it remotely.
    StoreRecordingRequest {
        /// Optional remote-store folder identifier to file the upload under.
        folder_id: Option<String>,
    },
    /// Request to composite two videos with the given job description.
    OverlayRequest(Box<overlay::OverlayJob>),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
