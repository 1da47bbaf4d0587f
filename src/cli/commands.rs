//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{parse_duration, ConfigOverrides};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - a terminal focus timer
#[derive(Parser, Debug)]
#[command(
    name = "tui-timer",
    version,
    about = "Pomodoro timer for the terminal",
    long_about = "A Pomodoro timer that runs in the terminal.\n\
                  Alternates work sessions and breaks, with a long break every few cycles,\n\
                  and announces each transition with a beep, a sound file or speech.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Work session length, e.g. 25m, 1h30m, 90s
    #[arg(long, value_name = "DURATION", value_parser = parse_duration, global = true)]
    pub work: Option<Duration>,

    /// Short break length
    #[arg(long, value_name = "DURATION", value_parser = parse_duration, global = true)]
    pub short_break: Option<Duration>,

    /// Long break length
    #[arg(long, value_name = "DURATION", value_parser = parse_duration, global = true)]
    pub long_break: Option<Duration>,

    /// Work sessions before a long break (0 disables long breaks)
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(0..=100),
        global = true
    )]
    pub cycles: Option<u32>,

    /// Voice used for spoken announcements
    #[arg(long, value_name = "NAME", global = true)]
    pub voice: Option<String>,

    /// Disable every sound and voice alert
    #[arg(long, global = true)]
    pub mute: bool,

    /// Use this config file instead of ~/.config/tui-timer/config.toml
    #[arg(long = "config", id = "config_file", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Flags that override values from the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            work: self.work,
            short_break: self.short_break,
            long_break: self.long_break,
            cycles: self.cycles,
            voice: self.voice.clone(),
            mute: self.mute,
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// `config` actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the config file path
    Path,

    /// Print the effective configuration (file plus flags) as TOML
    Show,
}

// ============================================================================
// Tests
// ============================================================================
