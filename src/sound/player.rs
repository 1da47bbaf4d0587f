//! Platform sound player.
//!
//! - Beep: the terminal bell
//! - Speech: the platform speech command (`say` on macOS, `espeak` elsewhere)
//! - Files: decoded and played with rodio v0.20
//!
//! Every method blocks until the alert is done. Callers run them on a
//! background thread.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use super::error::SoundError;

/// Speech synthesis command.
#[cfg(target_os = "macos")]
pub const SPEECH_COMMAND: &str = "say";
#[cfg(not(target_os = "macos"))]
pub const SPEECH_COMMAND: &str = "espeak";

/// ASCII BEL.
const BELL: &[u8] = b"\x07";

/// Sound player backed by the terminal, the OS speech command and rodio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSoundPlayer;

impl SystemSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rings the terminal bell.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::PlaybackError` if stdout cannot be written.
    pub fn beep(&self) -> Result<(), SoundError> {
        let mut out = io::stdout().lock();
        out.write_all(BELL)
            .and_then(|()| out.flush())
            .map_err(|e| SoundError::PlaybackError(e.to_string()))
    }

    /// Speaks `message` with the given voice and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::SpeechFailed` if the command is missing or exits
    /// with a failure status.
    pub fn speak(&self, voice: &str, message: &str) -> Result<(), SoundError> {
        debug!("Speaking with {}: {}", SPEECH_COMMAND, message);
        let output = speech_command(voice, message)
            .output()
            .map_err(|e| SoundError::SpeechFailed(format!("{}: {}", SPEECH_COMMAND, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SoundError::SpeechFailed(format!(
                "{} exited with {}: {}",
                SPEECH_COMMAND,
                output.status,
                stderr.trim()
            )))
        }
    }

    /// Plays an audio file to the end.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The audio format cannot be decoded
    /// - No output device or stream is available
    pub fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        // The stream must outlive the sink.
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

        debug!("Playing sound file: {}", path.display());
        sink.append(decoder);
        sink.sleep_until_end();
        Ok(())
    }
}

/// Builds the speech command for this platform.
fn speech_command(voice: &str, message: &str) -> Command {
    let mut command = Command::new(SPEECH_COMMAND);
    // espeak does not know the macOS voice names
    if cfg!(target_os = "macos") && !voice.is_empty() {
        command.arg("-v").arg(voice);
    }
    command
        .arg(message)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    command
}
