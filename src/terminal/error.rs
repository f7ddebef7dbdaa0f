//! Terminal error types.

use thiserror::Error;

/// Errors that can occur while driving the terminal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerminalError {
    /// Raw (unbuffered, no-echo) mode could not be enabled.
    #[error("could not enable raw mode: {0}")]
    RawMode(String),

    /// The previous terminal mode could not be restored.
    #[error("could not restore terminal mode: {0}")]
    Restore(String),

    /// Reading a key failed.
    #[error("could not read key: {0}")]
    Read(String),

    /// Writing the status line failed.
    #[error("could not write to terminal: {0}")]
    Write(String),
}

impl TerminalError {
    /// Returns true if this error is related to switching terminal modes.
    #[must_use]
    pub fn is_mode_error(&self) -> bool {
        matches!(self, Self::RawMode(_) | Self::Restore(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::RawMode(_) => "Run the timer from an interactive terminal",
            Self::Restore(_) => "Run `reset` if the terminal behaves oddly",
            Self::Read(_) => "Check that standard input is still attached",
            Self::Write(_) => "Check that standard output is still attached",
        }
    }
}
