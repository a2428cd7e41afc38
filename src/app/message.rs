// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::viewer::component;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// Build a fresh viewer over the configured sources and show it.
    OpenViewer,
    Viewer(component::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `LENS_PAGER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Page sources: file paths or http(s) URLs, in display order.
    pub sources: Vec<String>,
}
