use std::path::PathBuf;

use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Window,
    div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, IndexPath, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
    input::{InputState, TextInput},
    select::{Select, SelectItem, SelectState},
    slider::{Slider, SliderEvent, SliderState},
    switch::Switch,
};
use reelkit_bridge::overlay::{
    OverlayDelivery, OverlayJob, OverlayOutcome, OverlayParams, OverlayPosition, OverlaySource,
};

use crate::{BackendBridge, components::form_field::FormField, entities::DataEntities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceMode {
    File,
    DriveId,
}

#[derive(Debug, Clone)]
struct SourceModeChoice {
    display_name: SharedString,
    value: SourceMode,
}

impl SourceModeChoice {
    fn all() -> Vec<Self> {
        vec![
            Self {
                display_name: "Local file".into(),
                value: SourceMode::File,
            },
            Self {
                display_name: "Drive reference id".into(),
                value: SourceMode::DriveId,
            },
        ]
    }
}

impl SelectItem for SourceModeChoice {
    type Value = SourceMode;

    fn title(&self) -> SharedString {
        self.display_name.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.value
    }
}

#[derive(Debug, Clone)]
struct PositionChoice {
    display_name: SharedString,
    value: OverlayPosition,
}

impl PositionChoice {
    fn new(display_name: &'static str, value: OverlayPosition) -> Self {
        Self {
            display_name: display_name.into(),
            value,
        }
    }
}

impl SelectItem for PositionChoice {
    type Value = OverlayPosition;

    fn title(&self) -> SharedString {
        self.display_name.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.value
    }
}

pub struct OverlayPage {
    data: DataEntities,
    main_mode_selector: Entity<SelectState<Vec<SourceModeChoice>>>,
    main_source_input: Entity<InputState>,
    overlay_mode_selector: Entity<SelectState<Vec<SourceModeChoice>>>,
    overlay_source_input: Entity<InputState>,
    position_selector: Entity<SelectState<Vec<PositionChoice>>>,
    scale_state: Entity<SliderState>,
    main_volume_state: Entity<SliderState>,
    overlay_volume_state: Entity<SliderState>,
    speed_state: Entity<SliderState>,
    scale: f32,
    main_volume: f32,
    overlay_volume: f32,
    speed_factor: f32,
    upload_to_drive: bool,
    form_error: Option<SharedString>,
}

impl OverlayPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let main_mode_selector = cx.new(|cx| {
            SelectState::new(SourceModeChoice::all(), Some(IndexPath::default()), window, cx)
        });
        let overlay_mode_selector = cx.new(|cx| {
            SelectState::new(SourceModeChoice::all(), Some(IndexPath::default()), window, cx)
        });
        let position_selector = cx.new(|cx| {
            let choices = vec![
                PositionChoice::new("Top left", OverlayPosition::TopLeft),
                PositionChoice::new("Top right", OverlayPosition::TopRight),
                PositionChoice::new("Bottom left", OverlayPosition::BottomLeft),
                PositionChoice::new("Bottom right", OverlayPosition::BottomRight),
            ];
            // Top right mirrors the parameter default.
            SelectState::new(choices, Some(IndexPath::new(1)), window, cx)
        });

        let scale_state =
            cx.new(|_| SliderState::new().min(0.05).max(1.0).default_value(0.3));
        let main_volume_state =
            cx.new(|_| SliderState::new().min(0.1).max(2.0).default_value(1.0));
        let overlay_volume_state =
            cx.new(|_| SliderState::new().min(0.1).max(2.0).default_value(1.0));
        let speed_state =
            cx.new(|_| SliderState::new().min(0.25).max(4.0).default_value(1.0));

        cx.subscribe(&scale_state, |this, _, event: &SliderEvent, cx| match event {
            SliderEvent::Change(value) => {
                this.scale = *value;
                cx.notify();
            }
        })
        .detach();
        cx.subscribe(&main_volume_state, |this, _, event: &SliderEvent, cx| match event {
            SliderEvent::Change(value) => {
                this.main_volume = *value;
                cx.notify();
            }
        })
        .detach();
        cx.subscribe(&overlay_volume_state, |this, _, event: &SliderEvent, cx| match event {
            SliderEvent::Change(value) => {
                this.overlay_volume = *value;
                cx.notify();
            }
        })
        .detach();
        cx.subscribe(&speed_state, |this, _, event: &SliderEvent, cx| match event {
            SliderEvent::Change(value) => {
                this.speed_factor = *value;
                cx.notify();
            }
        })
        .detach();

        cx.observe(&data.overlay, |_, _, cx| cx.notify()).detach();

        Self {
            data: data.clone(),
            main_mode_selector,
            main_source_input: cx.new(|cx| {
                InputState::new(window, cx).placeholder("Path or reference id of the main video")
            }),
            overlay_mode_selector,
            overlay_source_input: cx.new(|cx| {
                InputState::new(window, cx).placeholder("Path or reference id of the overlay video")
            }),
            position_selector,
            scale_state,
            main_volume_state,
            overlay_volume_state,
            speed_state,
            scale: 0.3,
            main_volume: 1.0,
            overlay_volume: 1.0,
            speed_factor: 1.0,
            upload_to_drive: false,
            form_error: None,
        }
    }

    fn source(
        &self,
        selector: &Entity<SelectState<Vec<SourceModeChoice>>>,
        input: &Entity<InputState>,
        cx: &Context<Self>,
    ) -> OverlaySource {
        let mode = selector
            .read(cx)
            .selected_value()
            .copied()
            .unwrap_or(SourceMode::File);
        let text = input.read(cx).value().trim().to_owned();
        match mode {
            SourceMode::File => OverlaySource::File(PathBuf::from(text)),
            SourceMode::DriveId => OverlaySource::DriveId(text),
        }
    }

    fn build_job(&self, cx: &Context<Self>) -> OverlayJob {
        OverlayJob {
            main: self.source(&self.main_mode_selector, &self.main_source_input, cx),
            overlay: self.source(&self.overlay_mode_selector, &self.overlay_source_input, cx),
            params: OverlayParams {
                position: self
                    .position_selector
                    .read(cx)
                    .selected_value()
                    .copied()
                    .unwrap_or_default(),
                scale: f64::from(self.scale),
                main_volume: f64::from(self.main_volume),
                overlay_volume: f64::from(self.overlay_volume),
                speed_factor: f64::from(self.speed_factor),
            },
            delivery: if self.upload_to_drive {
                OverlayDelivery::StoreRemote
            } else {
                OverlayDelivery::DirectDownload
            },
        }
    }
}

impl Render for OverlayPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let overlay_state = self.data.overlay.read(cx).clone();
        let pending = overlay_state.pending;

        let outcome_line = overlay_state.outcome.as_ref().map(|outcome| match outcome {
            OverlayOutcome::SavedLocally { path } => {
                format!("Processed video saved to {}", path.display())
            }
            OverlayOutcome::StoredRemotely { drive_file_id } => {
                format!("Processed video stored with reference id: {drive_file_id}")
            }
        });

        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("Video Overlay").text_2xl().font_bold())
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Sources").text_xl().font_bold())
                    .child(
                        FormField::new("Main video")
                            .child(Select::new(&self.main_mode_selector))
                            .child(TextInput::new(&self.main_source_input)),
                    )
                    .child(
                        FormField::new("Overlay video")
                            .child(Select::new(&self.overlay_mode_selector))
                            .child(TextInput::new(&self.overlay_source_input)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Compositing").text_xl().font_bold())
                    .child(
                        FormField::new("Position").child(Select::new(&self.position_selector)),
                    )
                    .child(
                        FormField::new("Scale")
                            .hint("Relative size of the overlay, up to the full frame.")
                            .child(
                                div()
                                    .flex()
                                    .items_center()
                                    .gap_3()
                                    .child(Slider::new(&self.scale_state).max_w_1_2())
                                    .child(format!("{:.2}", self.scale)),
                            ),
                    )
                    .child(
                        FormField::new("Main volume").child(
                            div()
                                .flex()
                                .items_center()
                                .gap_3()
                                .child(Slider::new(&self.main_volume_state).max_w_1_2())
                                .child(format!("{:.1}", self.main_volume)),
                        ),
                    )
                    .child(
                        FormField::new("Overlay volume").child(
                            div()
                                .flex()
                                .items_center()
                                .gap_3()
                                .child(Slider::new(&self.overlay_volume_state).max_w_1_2())
                                .child(format!("{:.1}", self.overlay_volume)),
                        ),
                    )
                    .child(
                        FormField::new("Speed factor").child(
                            div()
                                .flex()
                                .items_center()
                                .gap_3()
                                .child(Slider::new(&self.speed_state).max_w_1_2())
                                .child(format!("{:.2}x", self.speed_factor)),
                        ),
                    )
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(
                                Switch::new("upload_to_drive")
                                    .checked(self.upload_to_drive)
                                    .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                        this.upload_to_drive = *checked;
                                        cx.notify();
                                    })),
                            )
                            .child("Store the result in Drive instead of downloading"),
                    ),
            )
            .when(self.form_error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(self.form_error.clone().unwrap()),
                )
            })
            .child(
                div().flex().gap_3().child(
                    Button::new("submit_overlay")
                        .primary()
                        .loading(pending)
                        .disabled(pending)
                        .label(if pending { "Processing..." } else { "Process Video" })
                        .on_click(cx.listener(|this, _, _, cx| {
                            let job = this.build_job(cx);
                            if let Err(validation) = job.validate() {
                                this.form_error = Some(validation.to_string().into());
                                cx.notify();
                                return;
                            }
                            this.form_error = None;
                            this.data.overlay.update(cx, |model, cx| {
                                model.pending = true;
                                model.outcome = None;
                                model.error = None;
                                cx.notify();
                            });
                            let bridge = cx.global::<BackendBridge>().clone();
                            cx.spawn(async move |_, _| {
                                bridge.overlay(job).await;
                            })
                            .detach();
                        })),
                ),
            )
            .when(overlay_state.error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(overlay_state.error.clone().unwrap()),
                )
            })
            .children(outcome_line)
    }
}
