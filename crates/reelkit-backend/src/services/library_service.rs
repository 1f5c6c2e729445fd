use std::path::Path;

use futures_util::StreamExt;
use reelkit_bridge::MessageFromBackend;
use tokio::io::AsyncWriteExt;

use crate::api;

/// Strips any directory components from a service-supplied filename, so a
/// response can never steer the write outside the downloads directory.
fn sanitized_file_name(filename: &str) -> Option<String> {
    Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .filter(|name| !name.is_empty() && name != "." && name != "..")
}

/// Handles an incoming by-filename media download (see
/// [`reelkit_bridge::MessageToBackend::DownloadMediaRequest`]).
///
/// Streams the file into the downloads directory, pushing byte-progress
/// updates to the frontend while the transfer is running.
pub async fn handle_download_media_request(context: super::AppContextHandle, filename: String) {
    let (config, request_client, downloads_dir) = {
        let state = context.state.read().await;
        (
            state.config.clone(),
            state.request_client.clone(),
            state.downloads_dir(),
        )
    };

    let Some(file_name) = sanitized_file_name(&filename) else {
        context
            .send(MessageFromBackend::MediaDownloadFailed {
                filename,
                message: "the service reported an unusable filename".to_owned(),
            })
            .await;
        return;
    };

    let url = api::endpoint(
        &config.endpoints.scraper_base_url,
        &format!("download/{file_name}"),
    );
    let save_path = downloads_dir.join(&file_name);
    log::info!("Downloading {file_name} from {url}, saving to {save_path:?}");

    let fail = |message: String| MessageFromBackend::MediaDownloadFailed {
        filename: file_name.clone(),
        message,
    };

    let response = match api::with_credentials(request_client.get(url), &config.credentials)
        .send()
        .await
    {
        Ok(response) => response,
        Err(error) => {
            context.send(fail(error.without_url().to_string())).await;
            return;
        }
    };

    let status = response.status();
    let is_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if !status.is_success() || is_json {
        // The service reports a missing file as JSON rather than binary
        // content, regardless of the status code.
        let body = response.text().await.unwrap_or_default();
        context.send(fail(api::failure_message(status, &body))).await;
        return;
    }

    if let Some(parent) = save_path.parent()
        && let Err(error) = tokio::fs::create_dir_all(parent).await
    {
        context.send(fail(error.to_string())).await;
        return;
    }

    let mut output_file = match tokio::fs::File::create(&save_path).await {
        Ok(file) => file,
        Err(error) => {
            context.send(fail(error.to_string())).await;
            return;
        }
    };

    let total_bytes = response.content_length().unwrap_or(0);
    let mut downloaded_bytes = 0u64;
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(error) => {
                context.send(fail(error.without_url().to_string())).await;
                return;
            }
        };
        if let Err(error) = output_file.write_all(&chunk).await {
            context.send(fail(error.to_string())).await;
            return;
        }
        downloaded_bytes += chunk.len() as u64;

        context
            .send(MessageFromBackend::MediaDownloadProgressUpdate {
                filename: file_name.clone(),
                downloaded_bytes,
                total_bytes,
            })
            .await;
    }

    if let Err(error) = output_file.sync_all().await {
        context.send(fail(error.to_string())).await;
        return;
    }

    context
        .send(MessageFromBackend::MediaDownloadCompleted {
            filename: file_name,
            saved_to: save_path,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_stripped_to_their_last_component() {
        assert_eq!(
            sanitized_file_name("video_abc.mp4"),
            Some("video_abc.mp4".to_owned())
        );
        assert_eq!(
            sanitized_file_name("../../etc/passwd"),
            Some("passwd".to_owned())
        );
        assert_eq!(
            sanitized_file_name("nested/dir/image_a.jpg"),
            Some("image_a.jpg".to_owned())
        );
        assert_eq!(sanitized_file_name(""), None);
        assert_eq!(sanitized_file_name(".."), None);
    }
}
