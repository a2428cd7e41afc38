// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.

use super::{App, Message, Screen};
use crate::ui::viewer::component;
use iced::Task;

impl App {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenViewer => self.open_viewer(),
            Message::Viewer(msg) => {
                let Some(viewer) = self.viewer.as_mut() else {
                    return Task::none();
                };
                let (effect, task) = viewer.handle_message(msg);
                if effect == component::Effect::Closed {
                    self.viewer = None;
                    self.screen = Screen::Launcher;
                }
                task.map(Message::Viewer)
            }
        }
    }

    fn open_viewer(&mut self) -> Task<Message> {
        let count = self.sources.len();
        let on_close = Box::new(move || {
            tracing::info!(pages = count, "viewer closed");
        });
        let viewer = component::State::new(
            self.sources.iter().cloned(),
            Some(on_close),
            self.config.viewer.resolve(),
        );
        self.viewer = Some(viewer);
        self.screen = Screen::Viewer;
        Task::done(Message::Viewer(component::Message::Appeared))
    }
}
