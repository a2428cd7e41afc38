// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! The first available candidate wins:
//!
//! 1. explicit override passed by the caller (tests, embedding hosts)
//! 2. `--config-dir`, installed once at startup with [`init_cli_overrides`]
//! 3. the `LENS_PAGER_CONFIG_DIR` environment variable, when non-empty
//! 4. `dirs::config_dir()/LensPager`

use std::path::PathBuf;
use std::sync::OnceLock;

/// Directory name under the platform config dir.
const APP_NAME: &str = "LensPager";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "LENS_PAGER_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Where a resolved config directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirSource {
    Override,
    Cli,
    Environment,
    Platform,
}

/// Installs the `--config-dir` value.
///
/// Returns `false` if an override was already installed; the first value wins.
pub fn init_cli_overrides(config_dir: Option<String>) -> bool {
    CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok()
}

fn platform_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Picks the config directory from the given candidates.
fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env: Option<String>,
) -> Option<(PathBuf, DirSource)> {
    override_path
        .map(|path| (path, DirSource::Override))
        .or_else(|| cli.map(|path| (path, DirSource::Cli)))
        .or_else(|| {
            env.filter(|value| !value.is_empty())
                .map(|value| (PathBuf::from(value), DirSource::Environment))
        })
        .or_else(|| platform_config_dir().map(|path| (path, DirSource::Platform)))
}

/// Resolves the config directory and reports which candidate was used.
pub fn config_dir_source(override_path: Option<PathBuf>) -> Option<(PathBuf, DirSource)> {
    let cli = CLI_CONFIG_DIR.get().cloned().flatten();
    resolve(override_path, cli, std::env::var(ENV_CONFIG_DIR).ok())
}

/// Returns the config directory, or `None` when the platform has none.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` when given.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    let resolved = config_dir_source(override_path);
    if let Some((path, source)) = &resolved {
        tracing::trace!(path = %path.display(), ?source, "config dir resolved");
    }
    resolved.map(|(path, _)| path)
}
