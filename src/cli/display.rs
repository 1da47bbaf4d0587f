//! Output for the non-interactive subcommands.

use std::path::Path;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the config file path.
    pub fn show_config_path(path: &Path) {
        println!("{}", path.display());
    }

    /// Shows the effective configuration.
    pub fn show_config(source: &Path, toml: &str) {
        print!("{}", Self::format_config(source, toml));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("{}", Self::format_error(message));
    }

    fn format_config(source: &Path, toml: &str) -> String {
        let mut text = format!("# {}\n", source.display());
        text.push_str(toml);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    fn format_error(message: &str) -> String {
        format!("error: {}", message)
    }
}

// ============================================================================
// Tests
// ============================================================================
