use gpui::{IntoElement, ParentElement, Styled, div, prelude::FluentBuilder};
use gpui_component::{ActiveTheme, StyledExt};

/// A labeled form row: the label on top, the control(s) below, with an
/// optional hint line at the bottom.
#[derive(Default, IntoElement)]
pub struct FormField {
    label: &'static str,
    hint: Option<&'static str>,
    children: Vec<gpui::AnyElement>,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }
}

impl gpui::RenderOnce for FormField {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        div()
            .w_full()
            .flex()
            .flex_col()
            .gap_1()
            .child(div().child(self.label).font_semibold())
            .children(self.children)
            .when(self.hint.is_some(), |this| {
                this.child(
                    div()
                        .text_sm()
                        .text_color(cx.theme().muted_foreground)
                        .child(self.hint.unwrap()),
                )
            })
    }
}
