//! Sound playback for the Pomodoro Timer.
//!
//! Alerts come in three flavours: a short beep, a spoken phrase and an
//! audio file. The [`SoundPlayer`] trait abstracts over them so the driver
//! can be given any implementation:
//!
//! - [`SystemSoundPlayer`]: terminal bell, OS speech command, rodio
//! - [`NoopSoundPlayer`]: silent
//! - [`MockSoundPlayer`]: records calls for tests
//!
//! Implementations may block; the notifier always calls them from a
//! background thread.

mod error;
mod player;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{SystemSoundPlayer, SPEECH_COMMAND};

/// Trait for alert playback implementations.
pub trait SoundPlayer: Send + Sync {
    /// Plays a short beep.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn beep(&self) -> Result<(), SoundError>;

    /// Speaks `message` using `voice`.
    ///
    /// # Errors
    ///
    /// Returns an error if speech synthesis fails.
    fn speak(&self, voice: &str, message: &str) -> Result<(), SoundError>;

    /// Plays the audio file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, decoded or played.
    fn play_file(&self, path: &Path) -> Result<(), SoundError>;
}

impl SoundPlayer for SystemSoundPlayer {
    fn beep(&self) -> Result<(), SoundError> {
        SystemSoundPlayer::beep(self)
    }

    fn speak(&self, voice: &str, message: &str) -> Result<(), SoundError> {
        SystemSoundPlayer::speak(self, voice, message)
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        SystemSoundPlayer::play_file(self, path)
    }
}

/// Player that produces no sound at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSoundPlayer;

impl SoundPlayer for NoopSoundPlayer {
    fn beep(&self) -> Result<(), SoundError> {
        Ok(())
    }

    fn speak(&self, _voice: &str, _message: &str) -> Result<(), SoundError> {
        Ok(())
    }

    fn play_file(&self, _path: &Path) -> Result<(), SoundError> {
        Ok(())
    }
}

/// A call recorded by [`MockSoundPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCall {
    Beep,
    Speak { voice: String, message: String },
    File(PathBuf),
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    calls: Mutex<Vec<PlayCall>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (the call is still recorded).
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PlayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: PlayCall) -> Result<(), SoundError> {
        self.calls.lock().unwrap().push(call);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn beep(&self) -> Result<(), SoundError> {
        self.record(PlayCall::Beep)
    }

    fn speak(&self, voice: &str, message: &str) -> Result<(), SoundError> {
        self.record(PlayCall::Speak {
            voice: voice.to_string(),
            message: message.to_string(),
        })
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        self.record(PlayCall::File(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_noop_player_always_succeeds() {
        let player = NoopSoundPlayer;
        assert!(player.beep().is_ok());
        assert!(player.speak("Samantha", "hi").is_ok());
        assert!(player.play_file(Path::new("/does/not/exist.wav")).is_ok());
    }

    #[test]
    fn test_mock_records_calls_in_order() {
        let player = MockSoundPlayer::new();
        player.beep().unwrap();
        player.speak("Alex", "Break finished").unwrap();
        player.play_file(Path::new("/tmp/chime.wav")).unwrap();

        assert_eq!(player.call_count(), 3);
        assert_eq!(
            player.calls(),
            vec![
                PlayCall::Beep,
                PlayCall::Speak {
                    voice: "Alex".to_string(),
                    message: "Break finished".to_string()
                },
                PlayCall::File(PathBuf::from("/tmp/chime.wav")),
            ]
        );
    }

    #[test]
    fn test_mock_failure_mode() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);

        assert!(player.beep().is_err());
        assert_eq!(player.call_count(), 1);

        player.set_should_fail(false);
        assert!(player.beep().is_ok());
    }

    #[test]
    fn test_mock_clear_calls() {
        let player = MockSoundPlayer::new();
        player.beep().unwrap();
        player.clear_calls();
        assert_eq!(player.call_count(), 0);
    }

    #[test]
    fn test_players_are_object_safe_and_shareable() {
        let players: Vec<Arc<dyn SoundPlayer>> = vec![
            Arc::new(SystemSoundPlayer::new()),
            Arc::new(NoopSoundPlayer),
            Arc::new(MockSoundPlayer::new()),
        ];
        assert_eq!(players.len(), 3);
    }
}
