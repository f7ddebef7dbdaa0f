//! Sound system error types.
//!
//! Sound is best-effort: these errors are logged and never stop the timer.

use thiserror::Error;

/// Errors that can occur when starting alarm playback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// The sound file does not exist.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// The external player program is not installed.
    #[error("sound player '{0}' not found")]
    PlayerNotFound(String),

    /// The external player could not be started.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "Set alarm_sound in the config file to an existing file",
            Self::PlayerNotFound(_) => "Install alsa-utils (aplay) to hear the alarm",
            Self::PlaybackError(_) => "Check your audio setup",
        }
    }
}
