// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Only the viewer screen listens to anything: the launcher is driven by its
//! button alone.

use super::{Message, Screen};
use crate::ui::viewer::component;
use iced::Subscription;

/// Creates the subscription for the current screen.
pub fn create_subscription(
    screen: Screen,
    viewer: Option<&component::State>,
) -> Subscription<Message> {
    match (screen, viewer) {
        (Screen::Viewer, Some(viewer)) => viewer.subscription().map(Message::Viewer),
        _ => Subscription::none(),
    }
}
