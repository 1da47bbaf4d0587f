//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output for the non-interactive subcommands

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, ConfigAction};
pub use display::Display;
