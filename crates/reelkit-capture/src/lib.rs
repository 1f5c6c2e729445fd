//! Webcam/microphone recording through an ffmpeg subprocess.
//!
//! This crate wraps an `ffmpeg` child process into a small capture API that
//! is oriented toward start/stop recording of the local camera and
//! microphone. It focuses on:
//! - Discovering the ffmpeg binary and probing which encoders it supports.
//! - Selecting the first usable recording format from a descending
//!   preference list.
//! - Reading the encoded stream incrementally and grouping it into
//!   roughly once-per-second chunks.
//! - Assembling all chunks of a session into a single finished clip.
//!
//! The capture session is an explicit two-state machine (idle/recording);
//! at most one session is active at a time and a second start while
//! recording is an error rather than a second encoder process.

pub mod chunk;
pub mod encoder;
pub mod input;
pub mod recorder;

/// Errors that can occur while probing, starting, or finalizing a capture
/// session.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// No `ffmpeg` binary could be found on `PATH`.
    #[error("ffmpeg was not found on PATH; install it to enable recording")]
    FfmpegNotFound,
    /// The ffmpeg binary supports none of the preferred encoder
    /// combinations.
    #[error("no supported recording format: ffmpeg is missing the required encoders")]
    NoSupportedFormat,
    /// The encoder-probe invocation failed or produced unreadable output.
    #[error("failed to probe ffmpeg encoders: {0}")]
    Probe(String),
    /// `start` was called while a session is already recording.
    #[error("a capture session is already recording")]
    AlreadyRecording,
    /// `stop` was called without an active session.
    #[error("no capture session is recording")]
    NotRecording,
    /// Capture devices are not wired up for this operating system.
    #[error("webcam capture is not supported on this platform")]
    UnsupportedPlatform,
    /// The encoder process exited before the session was stopped.
    #[error("the encoder process failed: {0}")]
    EncoderFailed(String),
    /// An I/O error occurred while talking to the encoder process.
    #[error("capture i/o error: {0}")]
    Io(#[from] std::io::Error),
}
