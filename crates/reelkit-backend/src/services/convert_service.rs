use reelkit_bridge::MessageFromBackend;
use reelkit_bridge::notification::NotificationType;
use reelkit_bridge::remote::RemoteLinks;
use reqwest::multipart::{Form, Part};

use crate::api::{self, ApiError};

/// Handles a request to convert the retained clip and store it remotely
/// (see [`reelkit_bridge::MessageToBackend::StoreRecordingRequest`]).
///
/// The clip recorded by the last capture session is posted as multipart to
/// the media service, which transcodes it to MP4, uploads it to the remote
/// store, and answers with the stored file's references.
pub async fn handle_store_recording_request(
    context: super::AppContextHandle,
    folder_id: Option<String>,
) {
    let (config, request_client, clip) = {
        let state = context.state.read().await;
        let clip = state.last_clip.as_ref().map(|clip| {
            (
                clip.bytes.clone(),
                clip.file_name.clone(),
                clip.mime_type,
            )
        });
        (state.config.clone(), state.request_client.clone(), clip)
    };

    let Some((bytes, file_name, mime_type)) = clip else {
        context
            .send(MessageFromBackend::RecordingStoreFailed {
                message: "record a clip before uploading".to_owned(),
            })
            .await;
        return;
    };

    match submit_clip(
        &request_client,
        &config,
        bytes,
        file_name,
        mime_type,
        folder_id,
    )
    .await
    {
        Ok(links) => {
            context
                .send_notification(NotificationType::Success, "Recording converted and stored.")
                .await;
            context
                .send(MessageFromBackend::RecordingStored(links))
                .await;
        }
        Err(error) => {
            context
                .send(MessageFromBackend::RecordingStoreFailed {
                    message: error.to_string(),
                })
                .await;
        }
    }
}

async fn submit_clip(
    request_client: &reqwest::Client,
    config: &reelkit_bridge::config::Config,
    bytes: Vec<u8>,
    file_name: String,
    mime_type: &'static str,
    folder_id: Option<String>,
) -> Result<RemoteLinks, ApiError> {
    let url = api::endpoint(&config.endpoints.media_base_url, "convert-to-mp4");

    let file_part = Part::bytes(bytes).file_name(file_name).mime_str(mime_type)?;
    let mut form = Form::new().part("file", file_part);
    if let Some(folder_id) = folder_id.filter(|id| !id.trim().is_empty()) {
        form = form.text("folder_id", folder_id);
    }

    let response = request_client.post(url).multipart(form).send().await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Service(api::failure_message(status, &body)));
    }
    api::decode_reply(&body)
}
