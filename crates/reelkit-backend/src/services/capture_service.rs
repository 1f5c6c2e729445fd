use reelkit_bridge::MessageFromBackend;
use reelkit_bridge::capture::ClipSummary;
use reelkit_capture::input::CaptureOptions;
use reelkit_capture::recorder::Recorder;

use crate::state::RetainedClip;

fn capture_options(config: &reelkit_bridge::config::CaptureConfig) -> CaptureOptions {
    CaptureOptions {
        video_input: config.video_input.clone(),
        audio_input: config.audio_input.clone(),
        frame_width: config.frame_width,
        frame_height: config.frame_height,
        frame_rate: config.frame_rate,
    }
}

/// Handles a request to start a webcam/microphone capture session (see
/// [`reelkit_bridge::MessageToBackend::StartCaptureRequest`]).
///
/// Chunk callbacks from the encoder are forwarded to the frontend as
/// progress updates. Any failure leaves the session idle and is reported
/// as [`MessageFromBackend::CaptureFailed`].
pub async fn handle_start_capture_request(context: super::AppContextHandle) {
    let mut state = context.state.write().await;

    if state.recorder.is_none() {
        // ffmpeg may have been installed since startup; look again before
        // giving up.
        match Recorder::new() {
            Ok(recorder) => state.recorder = Some(recorder),
            Err(error) => {
                drop(state);
                context
                    .send(MessageFromBackend::CaptureFailed {
                        message: error.to_string(),
                    })
                    .await;
                return;
            }
        }
    }

    let options = capture_options(&state.config.capture);
    let progress_tx = context.tx.clone();
    let on_chunk = Box::new(move |info: reelkit_capture::chunk::ChunkInfo| {
        // The callback runs on the collector task; a full bridge buffer
        // only costs a progress tick, not the recording.
        let _ = progress_tx.try_send(MessageFromBackend::CaptureProgressUpdate {
            recorded_bytes: info.total_bytes,
            elapsed_seconds: info.elapsed_seconds,
        });
    });

    let recorder = state.recorder.as_mut().expect("recorder was just ensured");
    match recorder.start(&options, on_chunk).await {
        Ok(format) => {
            let format_label = format.label.to_owned();
            drop(state);
            log::info!("Capture started as {format_label}");
            context
                .send(MessageFromBackend::CaptureStartedResponse { format_label })
                .await;
        }
        Err(error) => {
            drop(state);
            context
                .send(MessageFromBackend::CaptureFailed {
                    message: error.to_string(),
                })
                .await;
        }
    }
}

/// Handles a request to stop the active capture session (see
/// [`reelkit_bridge::MessageToBackend::StopCaptureRequest`]).
///
/// The finished clip is written to the downloads directory as a best-effort
/// side effect and retained in memory for the convert-and-store upload.
pub async fn handle_stop_capture_request(context: super::AppContextHandle) {
    let mut state = context.state.write().await;

    let Some(recorder) = state.recorder.as_mut() else {
        drop(state);
        context
            .send(MessageFromBackend::CaptureFailed {
                message: "no capture session is recording".to_owned(),
            })
            .await;
        return;
    };

    let clip = match recorder.stop().await {
        Ok(clip) => clip,
        Err(error) => {
            drop(state);
            context
                .send(MessageFromBackend::CaptureFailed {
                    message: error.to_string(),
                })
                .await;
            return;
        }
    };

    let file_name = format!(
        "recording-{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        clip.format.extension
    );
    let downloads_dir = state.downloads_dir();
    let save_path = downloads_dir.join(&file_name);

    let saved_to = match tokio::fs::create_dir_all(&downloads_dir).await {
        Ok(()) => match tokio::fs::write(&save_path, &clip.bytes).await {
            Ok(()) => Some(save_path),
            Err(error) => {
                log::warn!("Failed to save the clip to {save_path:?}: {error}");
                None
            }
        },
        Err(error) => {
            log::warn!("Failed to create the downloads directory: {error}");
            None
        }
    };

    let summary = ClipSummary {
        file_name: file_name.clone(),
        format_label: clip.format.label.to_owned(),
        size_bytes: clip.bytes.len() as u64,
        duration_seconds: clip.duration_seconds,
        saved_to,
    };

    state.last_clip = Some(RetainedClip {
        bytes: clip.bytes,
        file_name,
        mime_type: clip.format.mime_type,
    });
    drop(state);

    log::info!(
        "Capture finished: {} ({} bytes)",
        summary.file_name,
        summary.size_bytes
    );
    context
        .send(MessageFromBackend::CaptureCompleted(summary))
        .await;
}
