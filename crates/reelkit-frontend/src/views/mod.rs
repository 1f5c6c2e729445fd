mod overlay_page;
mod recorder_page;
mod scrape_page;
mod settings_page;

use gpui::{AnyView, AppContext, Context, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    IconName, Root, Side,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};

use crate::{
    entities::DataEntities,
    views::{
        overlay_page::OverlayPage, recorder_page::RecorderPage, scrape_page::ScrapePage,
        settings_page::SettingsPage,
    },
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    Scrape,
    Recorder,
    Overlay,
    Settings,
}

pub struct FrontendUi {
    data: DataEntities,
    active_page: PageUi,
    active_page_view: AnyView,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial_view = cx.new(|cx| ScrapePage::new(data, window, cx)).into();
        Self {
            data: data.clone(),
            active_page: PageUi::Scrape,
            active_page_view: initial_view,
        }
    }

    pub fn change_page(&mut self, page: PageUi, window: &mut Window, cx: &mut Context<Self>) {
        let new_page = match page {
            PageUi::Scrape => cx.new(|cx| ScrapePage::new(&self.data, window, cx)).into(),
            PageUi::Recorder => cx
                .new(|cx| RecorderPage::new(&self.data, window, cx))
                .into(),
            PageUi::Overlay => cx.new(|cx| OverlayPage::new(&self.data, window, cx)).into(),
            PageUi::Settings => cx
                .new(|cx| SettingsPage::new(&self.data, window, cx))
                .into(),
        };
        self.active_page = page;
        self.active_page_view = new_page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let notification_layer = Root::render_notification_layer(window, cx);
        let on_page_change = |page| {
            cx.listener(move |this, _, window, cx| {
                this.change_page(page, window, cx);
            })
        };

        div()
            .flex()
            .size_full()
            .child(
                Sidebar::new(Side::Left)
                    .header(SidebarHeader::new().child("reelkit"))
                    .child(
                        SidebarGroup::new("Tools").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("Media Scraper")
                                        .active(self.active_page == PageUi::Scrape)
                                        .icon(IconName::Search)
                                        .on_click(on_page_change(PageUi::Scrape)),
                                )
                                .child(
                                    SidebarMenuItem::new("Reaction Recorder")
                                        .active(self.active_page == PageUi::Recorder)
                                        .icon(IconName::Frame)
                                        .on_click(on_page_change(PageUi::Recorder)),
                                )
                                .child(
                                    SidebarMenuItem::new("Video Overlay")
                                        .active(self.active_page == PageUi::Overlay)
                                        .icon(IconName::GalleryVerticalEnd)
                                        .on_click(on_page_change(PageUi::Overlay)),
                                )
                                .child(
                                    SidebarMenuItem::new("Settings")
                                        .active(self.active_page == PageUi::Settings)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Settings)),
                                ),
                        ),
                    ),
            )
            .child(
                div()
                    .p_5()
                    .size_full()
                    .overflow_y_scroll()
                    .child(self.active_page_view.clone()),
            )
            .children(notification_layer)
    }
}
