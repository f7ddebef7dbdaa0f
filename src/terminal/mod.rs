//! Terminal input and status-line output.
//!
//! The countdown needs four things from the terminal:
//!
//! - an immediate, unbuffered, no-echo input mode for the duration of the run
//! - a non-blocking check for a single buffered key
//! - a blocking read of the next key
//! - a status line that overwrites itself instead of scrolling
//!
//! [`TerminalIo`] captures exactly that, so the countdown never sees file
//! descriptors or platform event types. [`CrosstermTerminal`] is the real
//! implementation; [`MockTerminal`] replays scripted keys for tests.
//!
//! Raw mode is owned through [`RawModeGuard`], which restores the previous
//! mode when it goes out of scope on any path.

mod backend;
mod error;

pub use backend::CrosstermTerminal;
pub use error::TerminalError;

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

use tracing::warn;

/// Key that pauses a running countdown and resumes a paused one.
pub const PAUSE_KEY: char = ' ';

// ============================================================================
// Key
// ============================================================================

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Ctrl-C, which raw mode delivers as a key instead of a signal
    Interrupt,
    /// Anything else (arrows, function keys, ...)
    Other,
}

impl Key {
    /// Returns true if this key toggles pause.
    #[must_use]
    pub fn is_pause_toggle(&self) -> bool {
        *self == Key::Char(PAUSE_KEY)
    }
}

// ============================================================================
// TerminalIo
// ============================================================================

/// Terminal capabilities used by the countdown.
pub trait TerminalIo {
    /// Switches to immediate, unbuffered, no-echo key reads.
    fn enable_raw_mode(&mut self) -> Result<(), TerminalError>;

    /// Restores the mode that was active before [`Self::enable_raw_mode`].
    fn restore_mode(&mut self) -> Result<(), TerminalError>;

    /// Returns a buffered key if one is available, without waiting.
    fn poll_key(&mut self) -> Result<Option<Key>, TerminalError>;

    /// Blocks until the next key is pressed.
    fn read_key(&mut self) -> Result<Key, TerminalError>;

    /// Replaces the current status line with `line`.
    fn write_line(&mut self, line: &str) -> Result<(), TerminalError>;
}

// ============================================================================
// RawModeGuard
// ============================================================================

/// Scoped raw-mode ownership.
///
/// Dereferences to the wrapped terminal and restores its mode on drop.
pub struct RawModeGuard<'a, T: TerminalIo + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: TerminalIo + ?Sized> RawModeGuard<'a, T> {
    /// Enables raw mode on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns the terminal's error if raw mode cannot be enabled; the
    /// terminal is left untouched in that case.
    pub fn acquire(terminal: &'a mut T) -> Result<Self, TerminalError> {
        terminal.enable_raw_mode()?;
        Ok(Self { terminal })
    }
}

impl<T: TerminalIo + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: TerminalIo + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: TerminalIo + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.restore_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

// ============================================================================
// MockTerminal
// ============================================================================

/// Mock terminal for testing.
///
/// Every call to `poll_key` consumes one scripted poll result (no key once the
/// script runs out). Every call to `read_key` consumes one scripted read; an
/// exhausted read script behaves like a closed input stream.
#[derive(Debug, Default)]
pub struct MockTerminal {
    polls: VecDeque<Result<Option<Key>, TerminalError>>,
    reads: VecDeque<Result<Key, TerminalError>>,
    lines: Vec<String>,
    raw: bool,
    enable_calls: usize,
    restore_calls: usize,
    fail_raw_mode: bool,
}

impl MockTerminal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends poll results, one per tick.
    #[must_use]
    pub fn with_polls<I>(mut self, polls: I) -> Self
    where
        I: IntoIterator<Item = Option<Key>>,
    {
        self.polls.extend(polls.into_iter().map(Ok));
        self
    }

    /// Appends a failing poll.
    #[must_use]
    pub fn with_poll_error(mut self, error: TerminalError) -> Self {
        self.polls.push_back(Err(error));
        self
    }

    /// Appends blocking reads.
    #[must_use]
    pub fn with_reads<I>(mut self, reads: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        self.reads.extend(reads.into_iter().map(Ok));
        self
    }

    /// Appends a failing blocking read.
    #[must_use]
    pub fn with_read_error(mut self, error: TerminalError) -> Self {
        self.reads.push_back(Err(error));
        self
    }

    /// Makes `enable_raw_mode` fail.
    #[must_use]
    pub fn with_raw_mode_failure(mut self) -> Self {
        self.fail_raw_mode = true;
        self
    }

    /// Returns every line written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns true if raw mode is currently enabled.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    #[must_use]
    pub fn enable_calls(&self) -> usize {
        self.enable_calls
    }

    #[must_use]
    pub fn restore_calls(&self) -> usize {
        self.restore_calls
    }
}

impl TerminalIo for MockTerminal {
    fn enable_raw_mode(&mut self) -> Result<(), TerminalError> {
        self.enable_calls += 1;
        if self.fail_raw_mode {
            return Err(TerminalError::RawMode("Mock failure".to_string()));
        }
        self.raw = true;
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<(), TerminalError> {
        self.restore_calls += 1;
        self.raw = false;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<Key>, TerminalError> {
        self.polls.pop_front().unwrap_or(Ok(None))
    }

    fn read_key(&mut self) -> Result<Key, TerminalError> {
        self.reads
            .pop_front()
            .unwrap_or_else(|| Err(TerminalError::Read("end of input".to_string())))
    }

    fn write_line(&mut self, line: &str) -> Result<(), TerminalError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_toggle() {
        assert!(Key::Char(' ').is_pause_toggle());
        assert!(!Key::Char('p').is_pause_toggle());
        assert!(!Key::Interrupt.is_pause_toggle());
        assert!(!Key::Other.is_pause_toggle());
    }

    mod raw_mode_guard_tests {
        use super::*;

        #[test]
        fn test_guard_restores_on_drop() {
            let mut terminal = MockTerminal::new();
            {
                let guard = RawModeGuard::acquire(&mut terminal).unwrap();
                assert!(guard.is_raw());
            }
            assert!(!terminal.is_raw());
            assert_eq!(terminal.restore_calls(), 1);
        }

        #[test]
        fn test_guard_restores_on_early_return() {
            fn fails(terminal: &mut MockTerminal) -> Result<(), TerminalError> {
                let mut guard = RawModeGuard::acquire(terminal)?;
                guard.read_key()?;
                Ok(())
            }

            let mut terminal = MockTerminal::new();
            assert!(fails(&mut terminal).is_err());
            assert!(!terminal.is_raw());
            assert_eq!(terminal.restore_calls(), 1);
        }

        #[test]
        fn test_failed_acquire_does_not_restore() {
            let mut terminal = MockTerminal::new().with_raw_mode_failure();
            assert!(matches!(
                RawModeGuard::acquire(&mut terminal),
                Err(TerminalError::RawMode(_))
            ));
            assert_eq!(terminal.enable_calls(), 1);
            assert_eq!(terminal.restore_calls(), 0);
        }

        #[test]
        fn test_guard_derefs_to_terminal() {
            let mut terminal = MockTerminal::new();
            {
                let mut guard = RawModeGuard::acquire(&mut terminal).unwrap();
                guard.write_line("hello").unwrap();
            }
            assert_eq!(terminal.lines(), ["hello".to_string()]);
        }
    }

    mod mock_terminal_tests {
        use super::*;

        #[test]
        fn test_polls_follow_script_then_none() {
            let mut terminal = MockTerminal::new().with_polls([None, Some(Key::Char(' '))]);
            assert_eq!(terminal.poll_key(), Ok(None));
            assert_eq!(terminal.poll_key(), Ok(Some(Key::Char(' '))));
            assert_eq!(terminal.poll_key(), Ok(None));
        }

        #[test]
        fn test_exhausted_reads_fail() {
            let mut terminal = MockTerminal::new().with_reads([Key::Char('x')]);
            assert_eq!(terminal.read_key(), Ok(Key::Char('x')));
            assert!(matches!(terminal.read_key(), Err(TerminalError::Read(_))));
        }

        #[test]
        fn test_poll_error_is_scripted() {
            let mut terminal =
                MockTerminal::new().with_poll_error(TerminalError::Read("flaky".into()));
            assert!(terminal.poll_key().is_err());
            assert_eq!(terminal.poll_key(), Ok(None));
        }
    }
}
