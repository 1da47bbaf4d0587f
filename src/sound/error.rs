//! Sound system error types.
//!
//! Every variant is recoverable: the caller logs it and keeps the timer
//! running.

use thiserror::Error;

/// Errors that can occur while producing an alert.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no output connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The speech command could not be run or exited with a failure.
    #[error("speech synthesis failed: {0}")]
    SpeechFailed(String),

    /// Generic playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if a terminal bell is a sensible substitute.
    #[must_use]
    pub fn should_fallback_to_beep(&self) -> bool {
        self.is_file_error() || self.is_device_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert!(err.to_string().contains("no device"));
        assert!(err.to_string().contains("audio device not available"));

        let err = SoundError::FileNotFound("/path/to/sound.aiff".to_string());
        assert!(err.to_string().contains("/path/to/sound.aiff"));

        let err = SoundError::SpeechFailed("say: exit 1".to_string());
        assert!(err.to_string().contains("say: exit 1"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(SoundError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(SoundError::StreamError("x".into()).is_device_error());
        assert!(!SoundError::FileNotFound("x".into()).is_device_error());
        assert!(!SoundError::SpeechFailed("x".into()).is_device_error());
    }

    #[test]
    fn test_is_file_error() {
        assert!(SoundError::FileNotFound("x".into()).is_file_error());
        assert!(SoundError::DecodeError("x".into()).is_file_error());
        assert!(!SoundError::PlaybackError("x".into()).is_file_error());
    }

    #[test]
    fn test_should_fallback_to_beep() {
        assert!(SoundError::FileNotFound("x".into()).should_fallback_to_beep());
        assert!(SoundError::StreamError("x".into()).should_fallback_to_beep());
        assert!(!SoundError::SpeechFailed("x".into()).should_fallback_to_beep());
    }
}
