use gpui::{AppContext, Application, Global, WindowOptions};
use gpui_component::{
    Root, WindowExt,
    notification::{Notification, NotificationType},
};
use reelkit_bridge::MessageFromBackend;
use tokio::sync::mpsc;

use crate::entities::{
    downloads_entity::{ActiveTransfer, CompletedDownload, DownloadsEntity},
    overlay_entity::OverlayEntity,
    recorder_entity::{RecorderEntity, RecorderPhase},
    scrape_entity::ScrapeEntity,
    settings_entity::SettingsEntity,
};

pub mod components;
pub mod entities;
pub mod formatting;
mod views;

/// Frontend-side handle to the backend bridge, stored as a gpui global so
/// every view can issue commands.
#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<reelkit_bridge::MessageToBackend>,
}

impl BackendBridge {
    pub async fn request_config(&self) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::ConfigurationRequest)
            .await
            .expect("failed to request config");
    }

    pub async fn update_config(&self, config: reelkit_bridge::config::Config) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::UpdateConfigurationRequest(
                config,
            ))
            .await
            .expect("failed to request config update");
    }

    pub async fn scrape(&self, filter: reelkit_bridge::scrape::ScrapeFilter) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::ScrapeRequest(Box::new(
                filter,
            )))
            .await
            .expect("failed to request a scrape");
    }

    pub async fn list_local_folder(&self, folder_path: String) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::ListLocalFolderRequest { folder_path })
            .await
            .expect("failed to request a local folder listing");
    }

    pub async fn download_media(&self, filename: String) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::DownloadMediaRequest { filename })
            .await
            .expect("failed to request a media download");
    }

    pub async fn start_capture(&self) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::StartCaptureRequest)
            .await
            .expect("failed to request capture start");
    }

    pub async fn stop_capture(&self) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::StopCaptureRequest)
            .await
            .expect("failed to request capture stop");
    }

    pub async fn store_recording(&self, folder_id: Option<String>) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::StoreRecordingRequest { folder_id })
            .await
            .expect("failed to request a recording upload");
    }

    pub async fn overlay(&self, job: reelkit_bridge::overlay::OverlayJob) {
        self.to_backend
            .send(reelkit_bridge::MessageToBackend::OverlayRequest(Box::new(
                job,
            )))
            .await
            .expect("failed to request an overlay job");
    }
}

impl Global for BackendBridge {}

pub fn run(
    mut rx: mpsc::Receiver<reelkit_bridge::MessageFromBackend>,
    tx: mpsc::Sender<reelkit_bridge::MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let settings = cx.new(|_| SettingsEntity::default());
        let scrape = cx.new(|_| ScrapeEntity::default());
        let recorder = cx.new(|_| RecorderEntity::default());
        let overlay = cx.new(|_| OverlayEntity::default());
        let downloads = cx.new(|_| DownloadsEntity::default());

        let data = entities::DataEntities {
            settings,
            scrape,
            recorder,
            overlay,
            downloads,
        };
        let listener_data = data.clone();

        let bridge = BackendBridge {
            to_backend: tx.clone(),
        };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            cx.open_window(WindowOptions::default(), |window, cx| {
                let window_handle = window.window_handle();
                cx.spawn(async move |cx| {
                    while let Some(message) = rx.recv().await {
                        log::debug!("Got a message from backend: {message:?}");
                        match message {
                            MessageFromBackend::ConfigurationResponse(config) => {
                                SettingsEntity::update(&listener_data.settings, config, cx)
                            }
                            MessageFromBackend::NotificationMessage(notification) => {
                                let notification_type = match notification.notification_type {
                                    reelkit_bridge::notification::NotificationType::Info => {
                                        NotificationType::Info
                                    }
                                    reelkit_bridge::notification::NotificationType::Success => {
                                        NotificationType::Success
                                    }
                                    reelkit_bridge::notification::NotificationType::Warning => {
                                        NotificationType::Warning
                                    }
                                    reelkit_bridge::notification::NotificationType::Error => {
                                        NotificationType::Error
                                    }
                                };
                                window_handle
                                    .update(cx, |_, window, cx| {
                                        let notification = Notification::new()
                                            .message(notification.message)
                                            .with_type(notification_type);
                                        window.push_notification(notification, cx);
                                    })
                                    .expect("failed to push a new notification");
                            }
                            MessageFromBackend::ScrapeCompleted(outcome) => {
                                let _ = listener_data.scrape.update(cx, |model, cx| {
                                    model.pending = false;
                                    model.error = None;
                                    model.outcome = Some(*outcome);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::ScrapeFailed { message } => {
                                let _ = listener_data.scrape.update(cx, |model, cx| {
                                    model.pending = false;
                                    model.outcome = None;
                                    model.local_files = None;
                                    model.error = Some(message);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::LocalFolderListResponse(listing) => {
                                let _ = listener_data.scrape.update(cx, |model, cx| {
                                    model.local_files = Some(listing);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::MediaDownloadProgressUpdate {
                                filename,
                                downloaded_bytes,
                                total_bytes,
                            } => {
                                let _ = listener_data.downloads.update(cx, |model, cx| {
                                    model.active = Some(ActiveTransfer {
                                        filename,
                                        downloaded_bytes,
                                        total_bytes,
                                    });
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::MediaDownloadCompleted { filename, saved_to } => {
                                let _ = listener_data.downloads.update(cx, |model, cx| {
                                    model.active = None;
                                    model.completed.push(CompletedDownload {
                                        filename,
                                        saved_to,
                                    });
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::MediaDownloadFailed { filename, message } => {
                                let _ = listener_data.downloads.update(cx, |model, cx| {
                                    model.active = None;
                                    cx.notify();
                                });
                                window_handle
                                    .update(cx, |_, window, cx| {
                                        let notification = Notification::new()
                                            .message(format!(
                                                "Downloading {filename} failed: {message}"
                                            ))
                                            .with_type(NotificationType::Error);
                                        window.push_notification(notification, cx);
                                    })
                                    .expect("failed to push a new notification");
                            }
                            MessageFromBackend::CaptureStartedResponse { format_label } => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    model.start_pending = false;
                                    model.error = None;
                                    model.format_label = Some(format_label);
                                    // A new session invalidates the previous
                                    // clip's upload state.
                                    model.stored = None;
                                    model.store_error = None;
                                    model.phase = RecorderPhase::Recording {
                                        recorded_bytes: 0,
                                        elapsed_seconds: 0.0,
                                    };
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::CaptureProgressUpdate {
                                recorded_bytes,
                                elapsed_seconds,
                            } => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    if model.is_recording() {
                                        model.phase = RecorderPhase::Recording {
                                            recorded_bytes,
                                            elapsed_seconds,
                                        };
                                        cx.notify();
                                    }
                                });
                            }
                            MessageFromBackend::CaptureCompleted(clip) => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    model.stop_pending = false;
                                    model.error = None;
                                    model.phase = RecorderPhase::Finished { clip };
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::CaptureFailed { message } => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    model.start_pending = false;
                                    model.stop_pending = false;
                                    model.phase = RecorderPhase::Idle;
                                    model.error = Some(message);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::RecordingStored(links) => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    model.store_pending = false;
                                    model.store_error = None;
                                    model.stored = Some(links);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::RecordingStoreFailed { message } => {
                                let _ = listener_data.recorder.update(cx, |model, cx| {
                                    model.store_pending = false;
                                    model.stored = None;
                                    model.store_error = Some(message);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::OverlayCompleted(outcome) => {
                                let _ = listener_data.overlay.update(cx, |model, cx| {
                                    model.pending = false;
                                    model.error = None;
                                    model.outcome = Some(outcome);
                                    cx.notify();
                                });
                            }
                            MessageFromBackend::OverlayFailed { message } => {
                                let _ = listener_data.overlay.update(cx, |model, cx| {
                                    model.pending = false;
                                    model.outcome = None;
                                    model.error = Some(message);
                                    cx.notify();
                                });
                            }
                        }
                    }
                })
                .detach();

                cx.spawn(async move |_| {
                    bridge.request_config().await;
                })
                .detach();

                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
