//! The capture session: one ffmpeg subprocess per recording.
//!
//! `Recorder` owns the explicit idle/recording state machine. Starting a
//! session negotiates a recording format, spawns ffmpeg reading the camera
//! and microphone, and streams the encoded container from its stdout into a
//! [`ChunkAssembler`]. Stopping asks ffmpeg to finalize (by closing stdin
//! after a `q`), drains the collector, and assembles all chunks into one
//! finished clip.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::task::JoinHandle;

use crate::CaptureError;
use crate::chunk::{ChunkAssembler, ChunkInfo};
use crate::encoder::{self, RecordingFormat};
use crate::input::{self, CaptureOptions, Platform};

/// How often accumulated encoder output is sealed into a chunk.
const CHUNK_INTERVAL: Duration = Duration::from_secs(1);

/// How long a startup failure (missing device, busy camera) has to show up
/// before `start` reports success.
const STARTUP_GRACE: Duration = Duration::from_millis(400);

/// How long `stop` waits for ffmpeg to finalize before killing it.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Callback invoked roughly once per second with a sealed chunk.
pub type ChunkCallback = Box<dyn Fn(ChunkInfo) + Send + Sync>;

/// One finished recording, assembled from all chunks of a session.
#[derive(Debug)]
pub struct RecordedClip {
    /// The encoded container bytes.
    pub bytes: Vec<u8>,
    /// The format the session was encoded with.
    pub format: &'static RecordingFormat,
    /// Recorded duration in wall-clock seconds.
    pub duration_seconds: f64,
}

enum Session {
    Idle,
    Recording(ActiveSession),
}

struct ActiveSession {
    child: Child,
    stdin: Option<ChildStdin>,
    collector: JoinHandle<std::io::Result<ChunkAssembler>>,
    format: &'static RecordingFormat,
    started_at: Instant,
}

/// Owner of the single capture session.
pub struct Recorder {
    ffmpeg_path: String,
    session: Session,
}

impl Recorder {
    /// Creates a recorder, searching for the ffmpeg binary on `PATH`.
    pub fn new() -> Result<Self, CaptureError> {
        let ffmpeg_path = which::which("ffmpeg")
            .map_err(|_| CaptureError::FfmpegNotFound)?
            .to_string_lossy()
            .to_string();
        Ok(Self::with_ffmpeg_path(ffmpeg_path))
    }

    /// Creates a recorder using a specific ffmpeg binary.
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: path.into(),
            session: Session::Idle,
        }
    }

    /// Whether a capture session is currently recording.
    pub fn is_recording(&self) -> bool {
        matches!(self.session, Session::Recording(_))
    }

    /// Starts a capture session and returns the negotiated format.
    ///
    /// At most one session is active at a time; starting while recording is
    /// an error and does not touch the running session. `on_chunk` is
    /// invoked roughly once per second with the sealed chunk info.
    pub async fn start(
        &mut self,
        options: &CaptureOptions,
        on_chunk: ChunkCallback,
    ) -> Result<&'static RecordingFormat, CaptureError> {
        if self.is_recording() {
            return Err(CaptureError::AlreadyRecording);
        }

        let platform = Platform::current()?;
        let available = encoder::probe_available_encoders(&self.ffmpeg_path).await?;
        let format =
            encoder::select_recording_format(&available).ok_or(CaptureError::NoSupportedFormat)?;

        let args = build_capture_args(platform, options, format);
        log::debug!("ffmpeg capture args: {args:?}");

        let mut child = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CaptureError::EncoderFailed("failed to capture ffmpeg stdout".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CaptureError::EncoderFailed("failed to capture ffmpeg stderr".into()))?;

        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.contains("Error") || line.contains("error") {
                    log::warn!("ffmpeg: {line}");
                } else {
                    log::debug!("ffmpeg: {line}");
                }
            }
        });

        let started_at = Instant::now();
        let collector = tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut assembler = ChunkAssembler::new(CHUNK_INTERVAL);
            let mut buffer = [0u8; 64 * 1024];
            loop {
                let n = reader.read(&mut buffer).await?;
                if n == 0 {
                    break;
                }
                if let Some(info) = assembler.push(&buffer[..n], started_at.elapsed()) {
                    on_chunk(info);
                }
            }
            Ok(assembler)
        });

        // Device and encoder initialization failures surface within the
        // first few hundred milliseconds; report them from start rather
        // than from a much later stop.
        tokio::time::sleep(STARTUP_GRACE).await;
        if let Some(status) = child.try_wait()? {
            return Err(CaptureError::EncoderFailed(format!(
                "ffmpeg exited at startup with status: {status}"
            )));
        }

        self.session = Session::Recording(ActiveSession {
            child,
            stdin,
            collector,
            format,
            started_at,
        });
        Ok(format)
    }

    /// Stops the active session and returns the finished clip.
    ///
    /// The session is back in the idle state when this returns, whether the
    /// finalization succeeded or not.
    pub async fn stop(&mut self) -> Result<RecordedClip, CaptureError> {
        let Session::Recording(mut active) = std::mem::replace(&mut self.session, Session::Idle)
        else {
            return Err(CaptureError::NotRecording);
        };

        // A `q` on stdin makes ffmpeg finalize the container; closing the
        // pipe afterwards covers builds that only react to EOF.
        if let Some(mut stdin) = active.stdin.take() {
            let _ = stdin.write_all(b"q").await;
            let _ = stdin.flush().await;
        }

        let status = match tokio::time::timeout(STOP_TIMEOUT, active.child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                log::warn!("ffmpeg did not stop within {STOP_TIMEOUT:?}, killing it");
                active.child.start_kill()?;
                active.child.wait().await?
            }
        };

        let assembler = match active.collector.await {
            Ok(result) => result?,
            Err(join_error) => return Err(CaptureError::EncoderFailed(join_error.to_string())),
        };

        let duration_seconds = active.started_at.elapsed().as_secs_f64();
        let bytes = assembler.finish();
        if bytes.is_empty() {
            return Err(CaptureError::EncoderFailed(format!(
                "the encoder produced no output (exit status: {status})"
            )));
        }
        if !status.success() {
            // A kill after the timeout exits non-zero; the streamable
            // containers written so far remain readable.
            log::warn!("ffmpeg exited with status {status} on stop");
        }

        Ok(RecordedClip {
            bytes,
            format: active.format,
            duration_seconds,
        })
    }
}

/// Builds the full ffmpeg command line for one capture session.
fn build_capture_args(
    platform: Platform,
    options: &CaptureOptions,
    format: &RecordingFormat,
) -> Vec<String> {
    let mut args: Vec<String> = ["-hide_banner", "-loglevel", "warning", "-nostats"]
        .iter()
        .map(std::string::ToString::to_string)
        .collect();

    args.extend(input::input_args(platform, options));

    args.push("-c:v".to_owned());
    args.push(format.video_encoder.to_owned());
    args.push("-c:a".to_owned());
    args.push(format.audio_encoder.to_owned());
    args.extend(format.encode_args.iter().map(|arg| (*arg).to_owned()));
    args.extend(format.mux_args.iter().map(|arg| (*arg).to_owned()));

    args.push("-f".to_owned());
    args.push(format.container.to_owned());
    args.push("pipe:1".to_owned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::PREFERRED_FORMATS;

    #[test]
    fn capture_args_encode_and_stream_to_stdout() {
        let format = &PREFERRED_FORMATS[0];
        let args = build_capture_args(Platform::Linux, &CaptureOptions::default(), format);

        assert!(args.contains(&"-c:v".to_owned()));
        assert!(args.contains(&"libvpx-vp9".to_owned()));
        assert!(args.contains(&"-c:a".to_owned()));
        assert!(args.contains(&"libopus".to_owned()));
        assert!(args.contains(&"webm".to_owned()));
        assert_eq!(args.last(), Some(&"pipe:1".to_owned()));
    }

    #[test]
    fn mp4_capture_args_request_fragmented_output() {
        let mp4 = PREFERRED_FORMATS
            .iter()
            .find(|format| format.container == "mp4")
            .expect("mp4 is a preferred format");
        let args = build_capture_args(Platform::Linux, &CaptureOptions::default(), mp4);

        assert!(args.contains(&"-movflags".to_owned()));
        assert!(args.contains(&"+frag_keyframe+empty_moov".to_owned()));
    }

    #[tokio::test]
    async fn stop_without_a_session_is_an_error() {
        let mut recorder = Recorder::with_ffmpeg_path("ffmpeg");
        assert!(!recorder.is_recording());
        assert!(matches!(
            recorder.stop().await,
            Err(CaptureError::NotRecording)
        ));
    }

    #[tokio::test]
    async fn start_while_recording_keeps_the_running_session() {
        let mut recorder = Recorder::with_ffmpeg_path("ffmpeg");

        // Stand in for a running encoder with a process that lives until
        // its stdin closes.
        let mut child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn stand-in process");
        let stdin = child.stdin.take();
        recorder.session = Session::Recording(ActiveSession {
            child,
            stdin,
            collector: tokio::spawn(async {
                Ok::<_, std::io::Error>(ChunkAssembler::new(CHUNK_INTERVAL))
            }),
            format: &PREFERRED_FORMATS[0],
            started_at: Instant::now(),
        });

        let second_start = recorder
            .start(&CaptureOptions::default(), Box::new(|_| {}))
            .await;
        assert!(matches!(second_start, Err(CaptureError::AlreadyRecording)));
        assert!(recorder.is_recording());

        // Stopping tears the stand-in down and resets to idle even though
        // it produced no output.
        assert!(matches!(
            recorder.stop().await,
            Err(CaptureError::EncoderFailed(_))
        ));
        assert!(!recorder.is_recording());
    }
}
