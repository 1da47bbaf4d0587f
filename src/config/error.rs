//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::PathError;

/// Errors raised while loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Duration text could not be parsed.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// The offending text
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// A value parsed but is outside the accepted range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Config key
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file or its directory could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config location could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ConfigError {
    pub(crate) fn invalid_duration(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_display() {
        let err = ConfigError::invalid_duration("25x", "unknown unit 'x'");
        let msg = err.to_string();
        assert!(msg.contains("25x"));
        assert!(msg.contains("unknown unit"));
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid {
            field: "work_duration",
            reason: "must be at least 1s".to_string(),
        };
        assert_eq!(err.to_string(), "invalid work_duration: must be at least 1s");
    }

    #[test]
    fn test_read_display_includes_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("/tmp/tui-timer/config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/tui-timer/config.toml"));
    }
}
