use reelkit_bridge::MessageFromBackend;
use reelkit_bridge::config::Config;
use reelkit_bridge::scrape::{LocalFolderListing, ScrapeFilter, ScrapeOutcome};

use crate::api::{self, ApiError};

/// Handles an incoming scrape request (see
/// [`reelkit_bridge::MessageToBackend::ScrapeRequest`]).
///
/// Validation failures short-circuit before any request is issued. After a
/// successful scrape that saved files locally, a follow-up read-only listing
/// of the target folder is fetched; its failure is logged but never affects
/// the primary result.
pub async fn handle_scrape_request(context: super::AppContextHandle, filter: ScrapeFilter) {
    if let Err(validation) = filter.validate() {
        context
            .send(MessageFromBackend::ScrapeFailed {
                message: validation.to_string(),
            })
            .await;
        return;
    }

    let (config, request_client) = {
        let state = context.state.read().await;
        (state.config.clone(), state.request_client.clone())
    };

    let outcome = submit_scrape(&request_client, &config, &filter).await;
    match outcome {
        Ok(outcome) => {
            log::info!(
                "Scrape of r/{} returned {} item(s)",
                outcome.subreddit,
                outcome.media.len()
            );
            context
                .send(MessageFromBackend::ScrapeCompleted(Box::new(outcome)))
                .await;

            if let Some(local) = &filter.local_target {
                match fetch_local_listing(&request_client, &config, &local.folder_path).await {
                    Ok(listing) => {
                        context
                            .send(MessageFromBackend::LocalFolderListResponse(listing))
                            .await;
                    }
                    Err(error) => {
                        // Secondary call: the scrape itself already succeeded.
                        log::warn!("Listing the local download folder failed: {error}");
                    }
                }
            }
        }
        Err(error) => {
            context
                .send(MessageFromBackend::ScrapeFailed {
                    message: error.to_string(),
                })
                .await;
        }
    }
}

/// Handles a user-initiated local folder listing (see
/// [`reelkit_bridge::MessageToBackend::ListLocalFolderRequest`]).
pub async fn handle_list_local_folder_request(
    context: super::AppContextHandle,
    folder_path: String,
) {
    let (config, request_client) = {
        let state = context.state.read().await;
        (state.config.clone(), state.request_client.clone())
    };

    match fetch_local_listing(&request_client, &config, &folder_path).await {
        Ok(listing) => {
            context
                .send(MessageFromBackend::LocalFolderListResponse(listing))
                .await;
        }
        Err(error) => {
            context
                .send_notification(
                    reelkit_bridge::notification::NotificationType::Error,
                    error.to_string(),
                )
                .await;
        }
    }
}

async fn submit_scrape(
    request_client: &reqwest::Client,
    config: &Config,
    filter: &ScrapeFilter,
) -> Result<ScrapeOutcome, ApiError> {
    let url = api::endpoint(&config.endpoints.scraper_base_url, "scrape");

    let mut form = reqwest::multipart::Form::new();
    for (name, value) in filter.form_fields() {
        form = form.text(name, value);
    }

    let response = api::with_credentials(request_client.post(url), &config.credentials)
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Service(api::failure_message(status, &body)));
    }
    api::decode_reply(&body)
}

pub(crate) async fn fetch_local_listing(
    request_client: &reqwest::Client,
    config: &Config,
    folder_path: &str,
) -> Result<LocalFolderListing, ApiError> {
    let url = api::endpoint(&config.endpoints.scraper_base_url, "local-downloads");

    let response = api::with_credentials(request_client.get(url), &config.credentials)
        .query(&[("folder_path", folder_path)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Service(api::failure_message(status, &body)));
    }
    api::decode_reply(&body)
}
