use gpui::{ParentElement, Styled, div, prelude::FluentBuilder};
use gpui_component::ActiveTheme;

use crate::entities::downloads_entity::{ActiveTransfer, CompletedDownload};
use crate::formatting::format_bytes;

/// One-line status of by-filename media transfers: the transfer currently
/// streaming to disk, or the most recently finished one. Renders nothing
/// before the first download of the session.
#[derive(Debug, Clone)]
pub struct DownloadIndicator {
    active_transfer: Option<ActiveTransfer>,
    last_completed: Option<CompletedDownload>,
}

impl DownloadIndicator {
    pub fn new(data: &crate::entities::DataEntities, cx: &mut gpui::Context<Self>) -> Self {
        let downloads = data.downloads.clone();
        cx.observe(&downloads, |this, downloads, cx| {
            let state = downloads.read(cx);
            this.active_transfer = state.active.clone();
            this.last_completed = state.completed.last().cloned();
            cx.notify();
        })
        .detach();

        let state = data.downloads.read(cx);
        Self {
            active_transfer: state.active.clone(),
            last_completed: state.completed.last().cloned(),
        }
    }
}

impl gpui::Render for DownloadIndicator {
    fn render(
        &mut self,
        _: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        div()
            .text_sm()
            .text_color(cx.theme().muted_foreground)
            .when(self.active_transfer.is_some(), |this| {
                let transfer = self.active_transfer.as_ref().unwrap();
                let progress = if transfer.total_bytes > 0 {
                    format!(
                        "Downloading {}: {} of {}.",
                        transfer.filename,
                        format_bytes(transfer.downloaded_bytes),
                        format_bytes(transfer.total_bytes),
                    )
                } else {
                    format!(
                        "Downloading {}: {}.",
                        transfer.filename,
                        format_bytes(transfer.downloaded_bytes),
                    )
                };
                this.child(progress)
            })
            .when(
                self.active_transfer.is_none() && self.last_completed.is_some(),
                |this| {
                    let completed = self.last_completed.as_ref().unwrap();
                    this.child(format!(
                        "Downloaded {} to {}.",
                        completed.filename,
                        completed.saved_to.display(),
                    ))
                },
            )
    }
}
