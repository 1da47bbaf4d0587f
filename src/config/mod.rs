//! Configuration for the Pomodoro Timer.
//!
//! Settings are stored as TOML at `~/.config/tui-timer/config.toml`:
//!
//! ```toml
//! work_duration = "25m"
//! short_break = "5m"
//! long_break = "15m"
//! cycles_before_long = 4
//!
//! [sounds]
//! tick = true
//! finish = true
//! break = true
//!
//! [voice]
//! enabled = true
//! voice = "Samantha"
//!
//! [voice.messages]
//! work_done = "Work session finished"
//! break_done = "Break finished"
//! start = "Focus time started"
//! ```
//!
//! Missing keys fall back to the defaults above. Command-line flags are
//! layered on top with [`TimerConfig::apply_overrides`].

mod duration;
mod error;
mod store;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use duration::{format_duration, parse_duration};
pub use error::ConfigError;
pub use store::{ConfigStore, CONFIG_FILE};

// ============================================================================
// SoundsConfig
// ============================================================================

/// Which transitions produce an audible alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundsConfig {
    /// Beep on every elapsed second
    pub tick: bool,
    /// Alert when a work session ends
    pub finish: bool,
    /// Alert when a break ends
    #[serde(rename = "break")]
    pub break_done: bool,
    /// Audio file to play for finish/break alerts instead of the bell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for SoundsConfig {
    fn default() -> Self {
        Self {
            tick: true,
            finish: true,
            break_done: true,
            file: None,
        }
    }
}

// ============================================================================
// VoiceConfig
// ============================================================================

/// Phrases spoken at transitions. An empty phrase is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceMessages {
    pub work_done: String,
    pub break_done: String,
    pub start: String,
}

impl Default for VoiceMessages {
    fn default() -> Self {
        Self {
            work_done: "Work session finished".to_string(),
            break_done: "Break finished".to_string(),
            start: "Focus time started".to_string(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub enabled: bool,
    /// Voice name handed to the speech command
    pub voice: String,
    pub messages: VoiceMessages,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            voice: "Samantha".to_string(),
            messages: VoiceMessages::default(),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(with = "duration::serde_text", default = "default_work_duration")]
    pub work_duration: Duration,
    #[serde(with = "duration::serde_text", default = "default_short_break")]
    pub short_break: Duration,
    #[serde(with = "duration::serde_text", default = "default_long_break")]
    pub long_break: Duration,
    /// Work sessions per long break; 0 disables long breaks
    #[serde(default = "default_cycles_before_long")]
    pub cycles_before_long: u32,
    #[serde(default)]
    pub sounds: SoundsConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

fn default_work_duration() -> Duration {
    Duration::from_secs(25 * 60)
}
fn default_short_break() -> Duration {
    Duration::from_secs(5 * 60)
}
fn default_long_break() -> Duration {
    Duration::from_secs(15 * 60)
}
fn default_cycles_before_long() -> u32 {
    4
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            cycles_before_long: default_cycles_before_long(),
            sounds: SoundsConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

/// Values supplied on the command line, applied over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub work: Option<Duration>,
    pub short_break: Option<Duration>,
    pub long_break: Option<Duration>,
    pub cycles: Option<u32>,
    pub voice: Option<String>,
    /// Silence every sound and voice alert
    pub mute: bool,
}

impl TimerConfig {
    /// Applies command-line overrides in place.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(work) = overrides.work {
            self.work_duration = work;
        }
        if let Some(short_break) = overrides.short_break {
            self.short_break = short_break;
        }
        if let Some(long_break) = overrides.long_break {
            self.long_break = long_break;
        }
        if let Some(cycles) = overrides.cycles {
            self.cycles_before_long = cycles;
        }
        if let Some(voice) = &overrides.voice {
            self.voice.voice = voice.clone();
        }
        if overrides.mute {
            self.sounds.tick = false;
            self.sounds.finish = false;
            self.sounds.break_done = false;
            self.voice.enabled = false;
        }
    }

    /// Checks the values the timer engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if any duration is shorter than one
    /// second.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = Duration::from_secs(1);
        for (field, value) in [
            ("work_duration", self.work_duration),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
        ] {
            if value < min {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be at least 1s, got {}", format_duration(value)),
                });
            }
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if rendering fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    mod default_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = TimerConfig::default();
            assert_eq!(config.work_duration, mins(25));
            assert_eq!(config.short_break, mins(5));
            assert_eq!(config.long_break, mins(15));
            assert_eq!(config.cycles_before_long, 4);
            assert!(config.sounds.tick);
            assert!(config.sounds.finish);
            assert!(config.sounds.break_done);
            assert!(config.sounds.file.is_none());
            assert!(config.voice.enabled);
            assert_eq!(config.voice.voice, "Samantha");
            assert_eq!(config.voice.messages.start, "Focus time started");
        }

        #[test]
        fn test_default_validates() {
            assert!(TimerConfig::default().validate().is_ok());
        }
    }

    mod toml_tests {
        use super::*;

        #[test]
        fn test_parse_full_file() {
            let text = r#"
                work_duration = "50m"
                short_break = "10m"
                long_break = "1h"
                cycles_before_long = 3

                [sounds]
                tick = false
                finish = true
                break = false
                file = "/tmp/chime.wav"

                [voice]
                enabled = false
                voice = "Alex"

                [voice.messages]
                work_done = "done"
                break_done = "back to it"
                start = "go"
            "#;
            let config: TimerConfig = toml::from_str(text).unwrap();

            assert_eq!(config.work_duration, mins(50));
            assert_eq!(config.short_break, mins(10));
            assert_eq!(config.long_break, mins(60));
            assert_eq!(config.cycles_before_long, 3);
            assert!(!config.sounds.tick);
            assert!(!config.sounds.break_done);
            assert_eq!(config.sounds.file, Some(PathBuf::from("/tmp/chime.wav")));
            assert!(!config.voice.enabled);
            assert_eq!(config.voice.voice, "Alex");
            assert_eq!(config.voice.messages.break_done, "back to it");
        }

        #[test]
        fn test_partial_file_uses_defaults() {
            let config: TimerConfig = toml::from_str("work_duration = \"45m\"\n[voice]\nvoice = \"Daniel\"\n").unwrap();

            assert_eq!(config.work_duration, mins(45));
            assert_eq!(config.short_break, mins(5));
            assert_eq!(config.voice.voice, "Daniel");
            assert!(config.voice.enabled);
            assert_eq!(config.voice.messages, VoiceMessages::default());
            assert_eq!(config.sounds, SoundsConfig::default());
        }

        #[test]
        fn test_empty_file_is_default() {
            let config: TimerConfig = toml::from_str("").unwrap();
            assert_eq!(config, TimerConfig::default());
        }

        #[test]
        fn test_invalid_duration_is_rejected() {
            let result: Result<TimerConfig, _> = toml::from_str("short_break = \"five\"");
            let err = result.unwrap_err();
            assert!(err.to_string().contains("five"));
        }

        #[test]
        fn test_to_toml_uses_duration_text() {
            let text = TimerConfig::default().to_toml().unwrap();
            assert!(text.contains("work_duration = \"25m\""));
            assert!(text.contains("cycles_before_long = 4"));
            assert!(text.contains("break = true"));
            assert!(!text.contains("file"));
        }

        #[test]
        fn test_to_toml_is_reloadable() {
            let mut config = TimerConfig::default();
            config.long_break = Duration::from_secs(5400);
            config.sounds.file = Some(PathBuf::from("/tmp/bell.wav"));

            let reloaded: TimerConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
            assert_eq!(reloaded, config);
        }
    }

    mod override_tests {
        use super::*;

        #[test]
        fn test_no_overrides_is_identity() {
            let mut config = TimerConfig::default();
            config.apply_overrides(&ConfigOverrides::default());
            assert_eq!(config, TimerConfig::default());
        }

        #[test]
        fn test_overrides_replace_values() {
            let mut config = TimerConfig::default();
            config.apply_overrides(&ConfigOverrides {
                work: Some(mins(50)),
                short_break: Some(mins(7)),
                long_break: Some(mins(20)),
                cycles: Some(0),
                voice: Some("Victoria".to_string()),
                mute: false,
            });

            assert_eq!(config.work_duration, mins(50));
            assert_eq!(config.short_break, mins(7));
            assert_eq!(config.long_break, mins(20));
            assert_eq!(config.cycles_before_long, 0);
            assert_eq!(config.voice.voice, "Victoria");
            assert!(config.voice.enabled);
        }

        #[test]
        fn test_mute_disables_all_alerts() {
            let mut config = TimerConfig::default();
            config.apply_overrides(&ConfigOverrides {
                mute: true,
                ..ConfigOverrides::default()
            });

            assert!(!config.sounds.tick);
            assert!(!config.sounds.finish);
            assert!(!config.sounds.break_done);
            assert!(!config.voice.enabled);
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_validate_rejects_zero_duration() {
            let config = TimerConfig {
                short_break: Duration::ZERO,
                ..TimerConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { field: "short_break", .. }));
        }

        #[test]
        fn test_validate_rejects_sub_second() {
            let config = TimerConfig {
                work_duration: Duration::from_millis(500),
                ..TimerConfig::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validate_accepts_one_second() {
            let config = TimerConfig {
                work_duration: Duration::from_secs(1),
                short_break: Duration::from_secs(1),
                long_break: Duration::from_secs(1),
                ..TimerConfig::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_zero_cycles_is_valid() {
            let config = TimerConfig {
                cycles_before_long: 0,
                ..TimerConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }
}
