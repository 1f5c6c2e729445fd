use std::path::Path;

use reelkit_bridge::MessageFromBackend;
use reelkit_bridge::overlay::{OverlayDelivery, OverlayJob, OverlayOutcome, OverlaySource};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::api::{self, ApiError};

/// Filename the media service gives the direct-mode result; reused for the
/// local save.
const PROCESSED_FILE_NAME: &str = "processed_video.mp4";

/// Handles an incoming overlay job (see
/// [`reelkit_bridge::MessageToBackend::OverlayRequest`]).
///
/// Each source contributes either a binary file part or a reference-id
/// field. Response handling branches on the delivery mode: direct mode
/// saves the binary body without ever JSON-parsing it, remote-store mode
/// decodes the reference id without ever touching the filesystem.
pub async fn handle_overlay_request(context: super::AppContextHandle, job: OverlayJob) {
    if let Err(validation) = job.validate() {
        context
            .send(MessageFromBackend::OverlayFailed {
                message: validation.to_string(),
            })
            .await;
        return;
    }

    let (config, request_client, downloads_dir) = {
        let state = context.state.read().await;
        (
            state.config.clone(),
            state.request_client.clone(),
            state.downloads_dir(),
        )
    };

    match submit_overlay(&request_client, &config, &downloads_dir, &job).await {
        Ok(outcome) => {
            context
                .send(MessageFromBackend::OverlayCompleted(outcome))
                .await;
        }
        Err(error) => {
            context
                .send(MessageFromBackend::OverlayFailed {
                    message: error.to_string(),
                })
                .await;
        }
    }
}

async fn submit_overlay(
    request_client: &reqwest::Client,
    config: &reelkit_bridge::config::Config,
    downloads_dir: &Path,
    job: &OverlayJob,
) -> Result<OverlayOutcome, ApiError> {
    let url = api::endpoint(&config.endpoints.media_base_url, "overlay-video/");

    let mut form = Form::new();
    form = attach_source(form, "main_video", "main_video_drive_id", &job.main).await?;
    form = attach_source(form, "overlay_video", "overlay_video_drive_id", &job.overlay).await?;
    form = form
        .text(
            "params",
            serde_json::to_string(&job.params)
                .map_err(|error| ApiError::MalformedResponse(error.to_string()))?,
        )
        .text(
            "upload_to_drive",
            matches!(job.delivery, OverlayDelivery::StoreRemote).to_string(),
        );

    let response = request_client.post(url).multipart(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(ApiError::Service(api::failure_message(status, &body)));
    }

    match job.delivery {
        OverlayDelivery::StoreRemote => {
            let body = response.text().await?;
            let reply: StoredReply = api::decode_reply(&body)?;
            Ok(OverlayOutcome::StoredRemotely {
                drive_file_id: reply.drive_file_id,
            })
        }
        OverlayDelivery::DirectDownload => {
            let bytes = response.bytes().await?;
            tokio::fs::create_dir_all(downloads_dir)
                .await
                .map_err(|error| ApiError::Transport(error.to_string()))?;
            let path = downloads_dir.join(PROCESSED_FILE_NAME);
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|error| ApiError::Transport(error.to_string()))?;
            log::info!("Saved the processed video to {path:?}");
            Ok(OverlayOutcome::SavedLocally { path })
        }
    }
}

/// Adds one source to the form: local files become a binary part, remote
/// references become a text field. The two are mutually exclusive per
/// source by construction.
async fn attach_source(
    form: Form,
    file_field: &'static str,
    reference_field: &'static str,
    source: &OverlaySource,
) -> Result<Form, ApiError> {
    match source {
        OverlaySource::File(path) => {
            let data = tokio::fs::read(path)
                .await
                .map_err(|error| ApiError::Service(format!("failed to read {path:?}: {error}")))?;
            let file_name = path
                .file_name()
                .map_or_else(|| "video.mp4".to_owned(), |name| name.to_string_lossy().to_string());
            let part = Part::bytes(data).file_name(file_name).mime_str("video/mp4")?;
            Ok(form.part(file_field, part))
        }
        OverlaySource::DriveId(id) => Ok(form.text(reference_field, id.trim().to_owned())),
    }
}

#[derive(Debug, Deserialize)]
struct StoredReply {
    drive_file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_reply_decodes_the_reference_id() {
        let reply: StoredReply =
            api::decode_reply(r#"{"drive_file_id": "1a2b3c"}"#).expect("valid stored reply");
        assert_eq!(reply.drive_file_id, "1a2b3c");
    }

    #[test]
    fn stored_reply_rejects_bodies_without_a_reference() {
        assert!(api::decode_reply::<StoredReply>(r#"{"unexpected": true}"#).is_err());
    }
}
