// SPDX-License-Identifier: MPL-2.0
//! Demo application hosting the viewer.
//!
//! The `App` struct wires together localization, settings and the viewer
//! component. A launcher screen opens the viewer; closing the viewer returns
//! to the launcher.

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::viewer::component;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Placeholder sources used when none are given on the command line.
pub const DEFAULT_SOURCES: [&str; 3] = ["url1", "url2", "url3"];

pub const WINDOW_DEFAULT_WIDTH: u32 = 420;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 820;
pub const MIN_WINDOW_WIDTH: u32 = 240;
pub const MIN_WINDOW_HEIGHT: u32 = 320;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    sources: Vec<String>,
    viewer: Option<component::State>,
    screen: Screen,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("sources", &self.sources.len())
            .field("viewer_open", &self.viewer.is_some())
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(key) = config_warning {
            tracing::warn!(%key, "settings could not be loaded, using defaults");
        }
        let i18n = I18n::new(flags.lang.clone(), &config);

        let sources = if flags.sources.is_empty() {
            DEFAULT_SOURCES.iter().map(|s| (*s).to_string()).collect()
        } else {
            flags.sources
        };
        tracing::info!(pages = sources.len(), locale = %i18n.current_locale(), "starting");

        let app = App {
            i18n,
            config,
            sources,
            viewer: None,
            screen: Screen::Launcher,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_subscription(self.screen, self.viewer.as_ref())
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            viewer: self.viewer.as_ref(),
        })
    }
}
