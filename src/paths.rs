//! Per-user file locations.
//!
//! The layout is the same on every platform:
//! - config: `~/.config/tui-timer/`
//! - data (journal, debug log): `~/.local/share/tui-timer/`

use std::path::PathBuf;

use thiserror::Error;

/// Directory name used under the config and data roots.
pub const APP_NAME: &str = "tui-timer";

/// Errors while resolving per-user directories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The home directory could not be determined.
    #[error("could not determine the home directory")]
    NoHomeDir,
}

fn home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::NoHomeDir)
}

/// Returns `~/.config/tui-timer`.
pub fn config_dir() -> Result<PathBuf, PathError> {
    Ok(home_dir()?.join(".config").join(APP_NAME))
}

/// Returns `~/.local/share/tui-timer`.
pub fn data_dir() -> Result<PathBuf, PathError> {
    Ok(home_dir()?.join(".local").join("share").join(APP_NAME))
}
