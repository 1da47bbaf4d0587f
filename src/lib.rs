//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the terminal Pomodoro
//! timer. It includes:
//! - Timer engine: the pure state machine behind every session
//! - Configuration file, duration text and command-line overrides
//! - Sound, speech and file playback for transition alerts
//! - Append-only session journal
//! - Notifier mapping timer events to side effects
//! - CLI command parsing and display utilities
//! - Terminal UI and driver loop

pub mod cli;
pub mod config;
pub mod journal;
pub mod notifier;
pub mod paths;
pub mod sound;
pub mod timer;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ConfigOverrides, ConfigStore, TimerConfig};
pub use journal::{Journal, JournalError};
pub use notifier::{Alerts, Effect, Notifier};
pub use sound::{MockSoundPlayer, NoopSoundPlayer, SoundError, SoundPlayer, SystemSoundPlayer};
pub use timer::{RunState, TimerEngine, TimerEvent, TimerMode};
