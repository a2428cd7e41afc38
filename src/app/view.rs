// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{Message, Screen};
use crate::i18n::fluent::I18n;
use crate::ui::viewer::component;
use iced::widget::{button, container, text};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub viewer: Option<&'a component::State>,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    match (ctx.screen, ctx.viewer) {
        (Screen::Viewer, Some(viewer)) => viewer.view(ctx.i18n).map(Message::Viewer),
        _ => view_launcher(ctx.i18n),
    }
}

fn view_launcher(i18n: &I18n) -> Element<'_, Message> {
    let open = button(text(i18n.tr("launcher-open")).size(18))
        .padding(12)
        .on_press(Message::OpenViewer);

    container(open)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
