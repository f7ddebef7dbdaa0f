//! Countdown error types.

use thiserror::Error;

use crate::terminal::TerminalError;

/// Exit code for a countdown cut short with Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Errors that abort a countdown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountdownError {
    /// The terminal could not be put into raw mode; nothing was counted.
    #[error("terminal unavailable: {0}")]
    TerminalUnavailable(TerminalError),

    /// Reading the resume key failed while paused.
    #[error("input error while paused: {0}")]
    Input(TerminalError),

    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,
}

impl CountdownError {
    /// Returns true if the user cut the countdown short.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }

    /// Returns the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => INTERRUPTED_EXIT_CODE,
            Self::TerminalUnavailable(_) | Self::Input(_) => 1,
        }
    }
}
