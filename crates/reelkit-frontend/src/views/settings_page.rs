use std::path::PathBuf;

use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Window,
    div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
    input::{InputState, TextInput},
};
use reelkit_bridge::config::Config;

use crate::{BackendBridge, components::form_field::FormField, entities::DataEntities};

pub struct SettingsPage {
    data: DataEntities,
    scraper_url_input: Entity<InputState>,
    media_url_input: Entity<InputState>,
    client_id_input: Entity<InputState>,
    client_secret_input: Entity<InputState>,
    user_agent_input: Entity<InputState>,
    video_input_input: Entity<InputState>,
    audio_input_input: Entity<InputState>,
    frame_width_input: Entity<InputState>,
    frame_height_input: Entity<InputState>,
    frame_rate_input: Entity<InputState>,
    downloads_dir_input: Entity<InputState>,
    form_error: Option<SharedString>,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let config = data.settings.read(cx).config.clone();

        let text_or_empty = |value: &Option<String>| value.clone().unwrap_or_default();

        let this = Self {
            data: data.clone(),
            scraper_url_input: cx.new(|cx| {
                InputState::new(window, cx).default_value(config.endpoints.scraper_base_url.clone())
            }),
            media_url_input: cx.new(|cx| {
                InputState::new(window, cx).default_value(config.endpoints.media_base_url.clone())
            }),
            client_id_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .default_value(text_or_empty(&config.credentials.client_id))
            }),
            client_secret_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .default_value(text_or_empty(&config.credentials.client_secret))
            }),
            user_agent_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .default_value(text_or_empty(&config.credentials.user_agent))
            }),
            video_input_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .placeholder("Platform default")
                    .default_value(text_or_empty(&config.capture.video_input))
            }),
            audio_input_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .placeholder("Platform default")
                    .default_value(text_or_empty(&config.capture.audio_input))
            }),
            frame_width_input: cx.new(|cx| {
                InputState::new(window, cx).default_value(config.capture.frame_width.to_string())
            }),
            frame_height_input: cx.new(|cx| {
                InputState::new(window, cx).default_value(config.capture.frame_height.to_string())
            }),
            frame_rate_input: cx.new(|cx| {
                InputState::new(window, cx).default_value(config.capture.frame_rate.to_string())
            }),
            downloads_dir_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .placeholder("Platform download directory")
                    .default_value(
                        config
                            .downloads_dir
                            .clone()
                            .map(|dir| dir.display().to_string())
                            .unwrap_or_default(),
                    )
            }),
            form_error: None,
        };

        // The configuration arrives asynchronously after startup; refresh
        // the inputs when it lands.
        let settings = data.settings.clone();
        cx.observe_in(&settings.clone(), window, move |this, _, window, cx| {
            let config = settings.read(cx).config.clone();
            let updates: [(&Entity<InputState>, String); 11] = [
                (
                    &this.scraper_url_input,
                    config.endpoints.scraper_base_url.clone(),
                ),
                (&this.media_url_input, config.endpoints.media_base_url.clone()),
                (
                    &this.client_id_input,
                    config.credentials.client_id.clone().unwrap_or_default(),
                ),
                (
                    &this.client_secret_input,
                    config.credentials.client_secret.clone().unwrap_or_default(),
                ),
                (
                    &this.user_agent_input,
                    config.credentials.user_agent.clone().unwrap_or_default(),
                ),
                (
                    &this.video_input_input,
                    config.capture.video_input.clone().unwrap_or_default(),
                ),
                (
                    &this.audio_input_input,
                    config.capture.audio_input.clone().unwrap_or_default(),
                ),
                (&this.frame_width_input, config.capture.frame_width.to_string()),
                (
                    &this.frame_height_input,
                    config.capture.frame_height.to_string(),
                ),
                (&this.frame_rate_input, config.capture.frame_rate.to_string()),
                (
                    &this.downloads_dir_input,
                    config
                        .downloads_dir
                        .clone()
                        .map(|dir| dir.display().to_string())
                        .unwrap_or_default(),
                ),
            ];
            for (input, value) in updates {
                input.update(cx, |state, cx| state.set_value(value, window, cx));
            }
        })
        .detach();

        this
    }

    fn build_config(&self, cx: &Context<Self>) -> Result<Config, String> {
        let text = |input: &Entity<InputState>| input.read(cx).value().trim().to_owned();
        let optional = |input: &Entity<InputState>| {
            let value = text(input);
            (!value.is_empty()).then_some(value)
        };
        let dimension = |input: &Entity<InputState>, label: &str| {
            text(input)
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| format!("{label} must be a positive whole number"))
        };

        let mut config = self.data.settings.read(cx).config.clone();

        let scraper_base_url = text(&self.scraper_url_input);
        let media_base_url = text(&self.media_url_input);
        if scraper_base_url.is_empty() || media_base_url.is_empty() {
            return Err("service base URLs must not be empty".to_owned());
        }
        config.endpoints.scraper_base_url = scraper_base_url;
        config.endpoints.media_base_url = media_base_url;

        config.credentials.client_id = optional(&self.client_id_input);
        config.credentials.client_secret = optional(&self.client_secret_input);
        config.credentials.user_agent = optional(&self.user_agent_input);

        config.capture.video_input = optional(&self.video_input_input);
        config.capture.audio_input = optional(&self.audio_input_input);
        config.capture.frame_width = dimension(&self.frame_width_input, "frame width")?;
        config.capture.frame_height = dimension(&self.frame_height_input, "frame height")?;
        config.capture.frame_rate = dimension(&self.frame_rate_input, "frame rate")?;

        config.downloads_dir = optional(&self.downloads_dir_input).map(PathBuf::from);

        Ok(config)
    }
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("Settings").text_2xl().font_bold())
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Services").text_xl().font_bold())
                    .child(
                        FormField::new("Scraper service base URL")
                            .child(TextInput::new(&self.scraper_url_input)),
                    )
                    .child(
                        FormField::new("Media service base URL")
                            .child(TextInput::new(&self.media_url_input)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Credentials").text_xl().font_bold())
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child("Optional headers forwarded to the scraper service."),
                    )
                    .child(FormField::new("Client-ID").child(TextInput::new(&self.client_id_input)))
                    .child(
                        FormField::new("Client-Secret")
                            .child(TextInput::new(&self.client_secret_input)),
                    )
                    .child(
                        FormField::new("User-Agent").child(TextInput::new(&self.user_agent_input)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Capture").text_xl().font_bold())
                    .child(
                        FormField::new("Camera input")
                            .child(TextInput::new(&self.video_input_input)),
                    )
                    .child(
                        FormField::new("Microphone input")
                            .child(TextInput::new(&self.audio_input_input)),
                    )
                    .child(
                        FormField::new("Frame width")
                            .child(TextInput::new(&self.frame_width_input)),
                    )
                    .child(
                        FormField::new("Frame height")
                            .child(TextInput::new(&self.frame_height_input)),
                    )
                    .child(
                        FormField::new("Frame rate")
                            .child(TextInput::new(&self.frame_rate_input)),
                    )
                    .child(
                        FormField::new("Downloads directory")
                            .child(TextInput::new(&self.downloads_dir_input)),
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
                    Button::new("save_settings")
                        .primary()
                        .label("Save Settings")
                        .on_click(cx.listener(|this, _, _, cx| match this.build_config(cx) {
                            Err(message) => {
                                this.form_error = Some(message.into());
                                cx.notify();
                            }
                            Ok(config) => {
                                this.form_error = None;
                                cx.notify();
                                let bridge = cx.global::<BackendBridge>().clone();
                                cx.spawn(async move |_, _| {
                                    bridge.update_config(config).await;
                                })
                                .detach();
                            }
                        })),
                ),
            )
    }
}
