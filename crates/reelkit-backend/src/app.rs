//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the frontend bridge.

use std::sync::Arc;

use reelkit_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::UpdateConfigurationRequest(config) => {
                services::config_service::handle_update_configuration(self.clone(), config).await;
            }
            MessageToBackend::ScrapeRequest(filter) => {
                services::scrape_service::handle_scrape_request(self.clone(), *filter).await;
            }
            MessageToBackend::ListLocalFolderRequest { folder_path } => {
                services::scrape_service::handle_list_local_folder_request(
                    self.clone(),
                    folder_path,
                )
                .await;
            }
            MessageToBackend::DownloadMediaRequest { filename } => {
                services::library_service::handle_download_media_request(self.clone(), filename)
                    .await;
            }
            MessageToBackend::StartCaptureRequest => {
                services::capture_service::handle_start_capture_request(self.clone()).await;
            }
            MessageToBackend::StopCaptureRequest => {
                services::capture_service::handle_stop_capture_request(self.clone()).await;
            }
            MessageToBackend::StoreRecordingRequest { folder_id } => {
                services::convert_service::handle_store_recording_request(self.clone(), folder_id)
                    .await;
            }
            MessageToBackend::OverlayRequest(job) => {
                services::overlay_service::handle_overlay_request(self.clone(), *job).await;
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to frontend");
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(
        &self,
        notification_type: reelkit_bridge::notification::NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(
            reelkit_bridge::notification::NotificationMessage {
                notification_type,
                message: content.into(),
            },
        ))
        .await;
    }
}
