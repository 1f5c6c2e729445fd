use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div,
    prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
    input::{InputState, TextInput},
};
use reelkit_bridge::capture::ClipSummary;

use crate::{
    BackendBridge,
    components::form_field::FormField,
    entities::{DataEntities, recorder_entity::RecorderPhase},
    formatting::{format_bytes, format_elapsed},
};

pub struct RecorderPage {
    data: DataEntities,
    folder_id_input: Entity<InputState>,
}

impl RecorderPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.recorder, |_, _, cx| cx.notify()).detach();
        Self {
            data: data.clone(),
            folder_id_input: cx.new(|cx| {
                InputState::new(window, cx).placeholder("Drive folder id (optional)")
            }),
        }
    }

    fn clip_section(&self, clip: &ClipSummary, cx: &mut Context<Self>) -> impl IntoElement {
        let recorder_state = self.data.recorder.read(cx).clone();
        let store_pending = recorder_state.store_pending;

        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().child("Recorded clip").text_xl().font_bold())
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!(
                        "{}: {} ({}), {}",
                        clip.file_name,
                        format_bytes(clip.size_bytes),
                        clip.format_label,
                        format_elapsed(clip.duration_seconds),
                    )),
            )
            .when(clip.saved_to.is_some(), |this| {
                this.child(
                    div()
                        .text_sm()
                        .text_color(cx.theme().muted_foreground)
                        .child(format!(
                            "Saved to: {}",
                            clip.saved_to.clone().unwrap().display()
                        )),
                )
            })
            .child(
                FormField::new("Store in Drive folder (optional)")
                    .hint("Leave empty to store the converted clip in the Drive root.")
                    .child(TextInput::new(&self.folder_id_input)),
            )
            .child(
                div().flex().gap_3().child(
                    Button::new("store_recording")
                        .primary()
                        .loading(store_pending)
                        .disabled(store_pending)
                        .label(if store_pending {
                            "Uploading..."
                        } else {
                            "Convert to MP4 & store"
                        })
                        .on_click(cx.listener(|this, _, _, cx| {
                            let folder_id = this.folder_id_input.read(cx).value().trim().to_owned();
                            this.data.recorder.update(cx, |model, cx| {
                                model.store_pending = true;
                                model.store_error = None;
                                model.stored = None;
                                cx.notify();
                            });
                            let bridge = cx.global::<BackendBridge>().clone();
                            cx.spawn(async move |_, _| {
                                bridge
                                    .store_recording((!folder_id.is_empty()).then_some(folder_id))
                                    .await;
                            })
                            .detach();
                        })),
                ),
            )
            .when(recorder_state.store_error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(recorder_state.store_error.clone().unwrap()),
                )
            })
            .when(recorder_state.stored.is_some(), |this| {
                let links = recorder_state.stored.clone().unwrap();
                let view_url = links.view_url.clone();
                let download_url = links.download_url.clone();
                this.child(
                    div()
                        .flex()
                        .flex_col()
                        .gap_1()
                        .child(format!("Stored with reference id: {}", links.file_id))
                        .child(
                            div()
                                .flex()
                                .gap_2()
                                .child(
                                    Button::new("open_view_url")
                                        .outline()
                                        .label("View in Drive")
                                        .on_click(cx.listener(move |_, _, _, cx| {
                                            cx.open_url(&view_url);
                                        })),
                                )
                                .child(
                                    Button::new("open_download_url")
                                        .outline()
                                        .label("Download from Drive")
                                        .on_click(cx.listener(move |_, _, _, cx| {
                                            cx.open_url(&download_url);
                                        })),
                                ),
                        ),
                )
            })
    }
}

impl Render for RecorderPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let recorder_state = self.data.recorder.read(cx).clone();

        let controls = match &recorder_state.phase {
            RecorderPhase::Recording {
                recorded_bytes,
                elapsed_seconds,
            } => div()
                .flex()
                .flex_col()
                .gap_2()
                .child(
                    div()
                        .text_color(cx.theme().danger)
                        .font_semibold()
                        .child(format!(
                            "Recording {} ({})",
                            format_elapsed(*elapsed_seconds),
                            format_bytes(*recorded_bytes),
                        )),
                )
                .when(recorder_state.format_label.is_some(), |this| {
                    this.child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!(
                                "Format: {}",
                                recorder_state.format_label.clone().unwrap()
                            )),
                    )
                })
                .child(
                    div().flex().gap_3().child(
                        Button::new("stop_recording")
                            .primary()
                            .loading(recorder_state.stop_pending)
                            .disabled(recorder_state.stop_pending)
                            .label("Stop Recording")
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.data.recorder.update(cx, |model, cx| {
                                    model.stop_pending = true;
                                    cx.notify();
                                });
                                let bridge = cx.global::<BackendBridge>().clone();
                                cx.spawn(async move |_, _| {
                                    bridge.stop_capture().await;
                                })
                                .detach();
                            })),
                    ),
                ),
            _ => div().flex().gap_3().child(
                Button::new("start_recording")
                    .primary()
                    .loading(recorder_state.start_pending)
                    .disabled(recorder_state.start_pending)
                    .label("Start Recording")
                    .on_click(cx.listener(|this, _, _, cx| {
                        this.data.recorder.update(cx, |model, cx| {
                            model.start_pending = true;
                            model.error = None;
                            cx.notify();
                        });
                        let bridge = cx.global::<BackendBridge>().clone();
                        cx.spawn(async move |_, _| {
                            bridge.start_capture().await;
                        })
                        .detach();
                    })),
            ),
        };

        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("Reaction Recorder").text_2xl().font_bold())
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(
                        "Records the webcam and microphone; the finished clip lands in the \
                         downloads folder and can be converted and stored remotely.",
                    ),
            )
            .child(GroupBox::new().outline().child(controls))
            .when(recorder_state.error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(recorder_state.error.clone().unwrap()),
                )
            })
            .children(
                recorder_state
                    .finished_clip()
                    .cloned()
                    .map(|clip| GroupBox::new().outline().child(self.clip_section(&clip, cx))),
            )
    }
}
