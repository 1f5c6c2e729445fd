use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled, Window,
    div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, IconName, IndexPath, Sizable, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
    input::{InputState, TextInput},
    select::{Select, SelectItem, SelectState},
    switch::Switch,
};
use reelkit_bridge::scrape::{
    self, DriveTarget, LocalTarget, MediaItem, MediaKind, ScrapeFilter, SortOrder,
};

use crate::{
    BackendBridge,
    components::{download_indicator::DownloadIndicator, form_field::FormField},
    entities::DataEntities,
};

#[derive(Debug, Clone)]
struct SortChoice {
    display_name: SharedString,
    value: SortOrder,
}

impl SortChoice {
    fn new(display_name: &'static str, value: SortOrder) -> Self {
        Self {
            display_name: display_name.into(),
            value,
        }
    }
}

impl SelectItem for SortChoice {
    type Value = SortOrder;

    fn title(&self) -> SharedString {
        self.display_name.clone()
    }

    fn value(&self) -> &Self::Value {
        &self.value
    }
}

pub struct ScrapePage {
    data: DataEntities,
    subreddit_input: Entity<InputState>,
    keywords_input: Entity<InputState>,
    limit_input: Entity<InputState>,
    min_upvotes_input: Entity<InputState>,
    download_limit_input: Entity<InputState>,
    date_after_input: Entity<InputState>,
    drive_folder_input: Entity<InputState>,
    local_folder_input: Entity<InputState>,
    sort_selector: Entity<SelectState<Vec<SortChoice>>>,
    scrape_images: bool,
    scrape_videos: bool,
    save_to_drive: bool,
    save_locally: bool,
    form_error: Option<SharedString>,
    download_indicator: Entity<DownloadIndicator>,
}

impl ScrapePage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let sort_selector = cx.new(|cx| {
            let choices = vec![
                SortChoice::new("Hot", SortOrder::Hot),
                SortChoice::new("New", SortOrder::New),
                SortChoice::new("Top", SortOrder::Top),
                SortChoice::new("Rising", SortOrder::Rising),
            ];
            SelectState::new(choices, Some(IndexPath::default()), window, cx)
        });

        cx.observe(&data.scrape, |_, _, cx| cx.notify()).detach();
        cx.observe(&data.downloads, |_, _, cx| cx.notify()).detach();

        Self {
            data: data.clone(),
            subreddit_input: cx
                .new(|cx| InputState::new(window, cx).placeholder("Enter subreddit")),
            keywords_input: cx.new(|cx| {
                InputState::new(window, cx).placeholder("Keywords separated by commas")
            }),
            limit_input: cx.new(|cx| InputState::new(window, cx).default_value("25")),
            min_upvotes_input: cx.new(|cx| InputState::new(window, cx).default_value("0")),
            download_limit_input: cx
                .new(|cx| InputState::new(window, cx).placeholder("All matching files")),
            date_after_input: cx.new(|cx| InputState::new(window, cx).placeholder("YYYY-MM-DD")),
            drive_folder_input: cx.new(|cx| {
                InputState::new(window, cx)
                    .placeholder("e.g. https://drive.google.com/drive/folders/abc123")
            }),
            local_folder_input: cx
                .new(|cx| InputState::new(window, cx).placeholder("e.g. /home/you/media")),
            sort_selector,
            scrape_images: true,
            scrape_videos: true,
            save_to_drive: false,
            save_locally: false,
            form_error: None,
            download_indicator: cx.new(|cx| DownloadIndicator::new(data, cx)),
        }
    }

    fn build_filter(&self, cx: &Context<Self>) -> Result<ScrapeFilter, String> {
        let mut media_kinds = Vec::new();
        if self.scrape_images {
            media_kinds.push(MediaKind::Image);
        }
        if self.scrape_videos {
            media_kinds.push(MediaKind::Video);
        }

        let keywords: Vec<String> = self
            .keywords_input
            .read(cx)
            .value()
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_owned)
            .collect();

        let date_text = self.date_after_input.read(cx).value().trim().to_owned();
        let date_after = if date_text.is_empty() {
            None
        } else {
            Some(
                scrape::parse_date_after(&date_text)
                    .map_err(|_| "the date filter must use the YYYY-MM-DD format".to_owned())?,
            )
        };

        let drive_target = self.save_to_drive.then(|| {
            let folder_url = self.drive_folder_input.read(cx).value().trim().to_owned();
            DriveTarget {
                folder_url: (!folder_url.is_empty()).then_some(folder_url),
            }
        });
        let local_target = self.save_locally.then(|| LocalTarget {
            folder_path: self.local_folder_input.read(cx).value().trim().to_owned(),
        });

        Ok(ScrapeFilter {
            subreddit: self.subreddit_input.read(cx).value().trim().to_owned(),
            media_kinds,
            keywords,
            sort_by: self
                .sort_selector
                .read(cx)
                .selected_value()
                .copied()
                .unwrap_or_default(),
            limit: parse_count(&self.limit_input.read(cx).value(), 25, "posts to check")?,
            min_upvotes: parse_count(&self.min_upvotes_input.read(cx).value(), 0, "minimum upvotes")?,
            date_after,
            download_limit: parse_optional_count(
                &self.download_limit_input.read(cx).value(),
                "the download limit",
            )?,
            drive_target,
            local_target,
        })
    }

    fn media_row(&self, index: usize, item: &MediaItem, cx: &mut Context<Self>) -> impl IntoElement {
        let kind_label = match item.kind {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        let filename = item.filename.clone();
        let post_url = item.url.clone();
        let drive_link = item.drive_link.clone();

        div()
            .flex()
            .flex_col()
            .gap_1()
            .py_2()
            .child(
                div()
                    .font_semibold()
                    .child(format!("[{kind_label}] {}", item.title)),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!("Score: {} | Posted: {}", item.score, item.created)),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .items_center()
                    .child(
                        Button::new(("download_media", index))
                            .outline()
                            .small()
                            .icon(IconName::ArrowDown)
                            .label("Download")
                            .on_click(cx.listener(move |_, _, _, cx| {
                                let bridge = cx.global::<BackendBridge>().clone();
                                let filename = filename.clone();
                                cx.spawn(async move |_, _| {
                                    bridge.download_media(filename).await;
                                })
                                .detach();
                            })),
                    )
                    .child(
                        Button::new(("view_post", index))
                            .outline()
                            .small()
                            .label("View original post")
                            .on_click(cx.listener(move |_, _, _, cx| {
                                cx.open_url(&post_url);
                            })),
                    )
                    .when(drive_link.is_some(), |this| {
                        let drive_link = drive_link.clone().unwrap();
                        this.child(
                            Button::new(("view_on_drive", index))
                                .outline()
                                .small()
                                .label("View on Drive")
                                .on_click(cx.listener(move |_, _, _, cx| {
                                    cx.open_url(&drive_link);
                                })),
                        )
                    })
                    .when(item.local_path.is_some(), |this| {
                        this.child(
                            div()
                                .text_sm()
                                .text_color(cx.theme().muted_foreground)
                                .child(format!("Saved to: {}", item.local_path.clone().unwrap())),
                        )
                    }),
            )
    }

    fn results_section(&self, cx: &mut Context<Self>) -> Option<impl IntoElement> {
        let outcome = self.data.scrape.read(cx).outcome.clone()?;

        let summary = div()
            .flex()
            .flex_col()
            .gap_1()
            .text_sm()
            .text_color(cx.theme().muted_foreground)
            .child(format!("Sort: {}", outcome.sort_by.form_value()))
            .child(format!("Media types: {}", outcome.media_types.join(", ")))
            .child(format!(
                "Keywords: {}",
                if outcome.keywords.is_empty() {
                    "None".to_owned()
                } else {
                    outcome.keywords.clone()
                }
            ))
            .child(format!(
                "Date filter: {}",
                outcome.date_after.clone().unwrap_or_else(|| "None".to_owned())
            ))
            .child(format!("Minimum upvotes: {}", outcome.min_upvotes))
            .child(format!(
                "Download limit: {}",
                outcome
                    .download_limit
                    .map_or_else(|| "All".to_owned(), |limit| limit.to_string())
            ))
            .child(format!(
                "Total media found: {} ({} images, {} videos)",
                outcome.media.len(),
                outcome.image_count(),
                outcome.video_count(),
            ));

        let mut results = div()
            .flex()
            .flex_col()
            .gap_2()
            .child(
                div()
                    .text_xl()
                    .font_bold()
                    .child(format!("Scraped media from r/{}", outcome.subreddit)),
            )
            .child(summary);

        if outcome.media.is_empty() {
            results = results.child("No matching media found.");
        } else {
            for (index, item) in outcome.media.iter().enumerate() {
                results = results.child(self.media_row(index, item, cx));
            }
        }

        Some(GroupBox::new().outline().child(results))
    }

    fn local_files_section(&self, cx: &mut Context<Self>) -> Option<impl IntoElement> {
        let listing = self.data.scrape.read(cx).local_files.clone()?;
        let folder = listing.folder.clone();

        let mut section = div()
            .flex()
            .flex_col()
            .gap_1()
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_3()
                    .child(
                        div()
                            .text_xl()
                            .font_bold()
                            .child(format!("Files in local folder: {}", listing.folder)),
                    )
                    .child(
                        Button::new("refresh_local_files")
                            .outline()
                            .small()
                            .label("Refresh listing")
                            .on_click(cx.listener(move |_, _, _, cx| {
                                let bridge = cx.global::<BackendBridge>().clone();
                                let folder = folder.clone();
                                cx.spawn(async move |_, _| {
                                    bridge.list_local_folder(folder).await;
                                })
                                .detach();
                            })),
                    ),
            );
        for file in &listing.files {
            section = section.child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!(
                        "{} ({}) | Created: {}",
                        file.name,
                        crate::formatting::format_bytes(file.size),
                        file.created,
                    )),
            );
        }

        Some(GroupBox::new().outline().child(section))
    }
}

fn parse_count(text: &str, default: u32, label: &str) -> Result<u32, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(default);
    }
    text.parse::<u32>()
        .map_err(|_| format!("{label} must be a whole number"))
}

fn parse_optional_count(text: &str, label: &str) -> Result<Option<u32>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u32>()
        .map(Some)
        .map_err(|_| format!("{label} must be a whole number"))
}

impl Render for ScrapePage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let scrape_state = self.data.scrape.read(cx);
        let pending = scrape_state.pending;
        let request_error = scrape_state.error.clone();

        let switch_row = |label: &'static str, switch: Switch| {
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(switch)
                .child(label)
        };

        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("Media Scraper").text_2xl().font_bold())
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Query").text_xl().font_bold())
                    .child(
                        FormField::new("Subreddit name")
                            .child(TextInput::new(&self.subreddit_input)),
                    )
                    .child(
                        FormField::new("Media types to scrape").child(
                            div()
                                .flex()
                                .gap_6()
                                .child(switch_row(
                                    "Images",
                                    Switch::new("scrape_images")
                                        .checked(self.scrape_images)
                                        .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                            this.scrape_images = *checked;
                                            cx.notify();
                                        })),
                                ))
                                .child(switch_row(
                                    "Videos",
                                    Switch::new("scrape_videos")
                                        .checked(self.scrape_videos)
                                        .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                            this.scrape_videos = *checked;
                                            cx.notify();
                                        })),
                                )),
                        ),
                    )
                    .child(
                        FormField::new("Keywords (optional)")
                            .hint("Posts are filtered to those mentioning at least one keyword.")
                            .child(TextInput::new(&self.keywords_input)),
                    )
                    .child(FormField::new("Sort by").child(Select::new(&self.sort_selector)))
                    .child(
                        FormField::new("Number of posts to check")
                            .child(TextInput::new(&self.limit_input)),
                    )
                    .child(
                        FormField::new("Posts after date (optional)")
                            .hint("Only include posts created after this date.")
                            .child(TextInput::new(&self.date_after_input)),
                    )
                    .child(
                        FormField::new("Minimum upvotes (optional)")
                            .child(TextInput::new(&self.min_upvotes_input)),
                    )
                    .child(
                        FormField::new("Number of files to download (optional)")
                            .child(TextInput::new(&self.download_limit_input)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Destinations").text_xl().font_bold())
                    .child(switch_row(
                        "Save to Google Drive",
                        Switch::new("save_to_drive")
                            .checked(self.save_to_drive)
                            .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                this.save_to_drive = *checked;
                                cx.notify();
                            })),
                    ))
                    .when(self.save_to_drive, |this| {
                        this.child(
                            FormField::new("Google Drive folder URL (optional)")
                                .child(TextInput::new(&self.drive_folder_input)),
                        )
                    })
                    .child(switch_row(
                        "Save files to a local folder",
                        Switch::new("save_locally")
                            .checked(self.save_locally)
                            .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                this.save_locally = *checked;
                                cx.notify();
                            })),
                    ))
                    .when(self.save_locally, |this| {
                        this.child(
                            FormField::new("Local folder path")
                                .hint("Full path of the folder the service should copy files into.")
                                .child(TextInput::new(&self.local_folder_input)),
                        )
                    }),
            )
            .when(self.form_error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(self.form_error.clone().unwrap()),
                )
            })
            .child(
                div().flex().gap_3().items_center().child(
                    Button::new("submit_scrape")
                        .primary()
                        .loading(pending)
                        .disabled(pending)
                        .label(if pending { "Scraping..." } else { "Scrape Media" })
                        .on_click(cx.listener(|this, _, _, cx| {
                            match this.build_filter(cx) {
                                Err(message) => {
                                    this.form_error = Some(message.into());
                                    cx.notify();
                                }
                                Ok(filter) => {
                                    if let Err(validation) = filter.validate() {
                                        this.form_error = Some(validation.to_string().into());
                                        cx.notify();
                                        return;
                                    }
                                    this.form_error = None;
                                    this.data.scrape.update(cx, |model, cx| {
                                        model.begin_submission();
                                        cx.notify();
                                    });
                                    let bridge = cx.global::<BackendBridge>().clone();
                                    cx.spawn(async move |_, _| {
                                        bridge.scrape(filter).await;
                                    })
                                    .detach();
                                }
                            }
                        })),
                ),
            )
            .when(request_error.is_some(), |this| {
                this.child(
                    div()
                        .text_color(cx.theme().danger)
                        .child(request_error.unwrap()),
                )
            })
            .children(self.results_section(cx))
            .children(self.local_files_section(cx))
            .child(self.download_indicator.clone())
    }
}
