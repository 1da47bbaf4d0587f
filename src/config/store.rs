//! Reading and writing the config file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::ConfigError;
use super::TimerConfig;
use crate::paths;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// A config file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses the config file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `~/.config/tui-timer/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Path` if the home directory is unknown.
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::new(paths::config_dir()?.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// A missing file is created with the defaults, which are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// default file cannot be written.
    pub fn load(&self) -> Result<TimerConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = TimerConfig::default();
                self.save(&config)?;
                info!("Created default config at {}", self.path.display());
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Writes `config`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save(&self, config: &TimerConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = config.to_toml()?;
        fs::write(&self.path, text).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_load_missing_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join(CONFIG_FILE));

        let config = store.load().unwrap();

        assert_eq!(config, TimerConfig::default());
        assert!(store.path().exists());
        let written = fs::read_to_string(store.path()).unwrap();
        assert!(written.contains("work_duration = \"25m\""));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        let mut config = TimerConfig::default();
        config.work_duration = Duration::from_secs(50 * 60);
        config.voice.enabled = false;

        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        fs::write(store.path(), "work_duration = [").unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());

        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_open_default_path() {
        if let Ok(store) = ConfigStore::open_default() {
            assert!(store.path().ends_with(".config/tui-timer/config.toml"));
        }
    }
}
