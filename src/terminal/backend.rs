//! Terminal implementation backed by crossterm.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use super::error::TerminalError;
use super::{Key, TerminalIo};

/// A terminal on the process's standard streams.
///
/// Raw mode is left again when the value is dropped, even if
/// [`TerminalIo::restore_mode`] was never called.
#[derive(Debug)]
pub struct CrosstermTerminal {
    out: Stdout,
    raw_enabled: bool,
}

impl CrosstermTerminal {
    /// Creates a terminal handle without touching the terminal mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            raw_enabled: false,
        }
    }

    /// Returns true if raw mode is currently enabled by this handle.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw_enabled
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalIo for CrosstermTerminal {
    fn enable_raw_mode(&mut self) -> Result<(), TerminalError> {
        crossterm::terminal::enable_raw_mode()
            .map_err(|e| TerminalError::RawMode(e.to_string()))?;
        self.raw_enabled = true;
        debug!("Raw mode enabled");
        Ok(())
    }

    fn restore_mode(&mut self) -> Result<(), TerminalError> {
        if !self.raw_enabled {
            return Ok(());
        }
        crossterm::terminal::disable_raw_mode()
            .map_err(|e| TerminalError::Restore(e.to_string()))?;
        self.raw_enabled = false;
        debug!("Raw mode disabled");
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<Key>, TerminalError> {
        let ready =
            event::poll(Duration::ZERO).map_err(|e| TerminalError::Read(e.to_string()))?;
        if !ready {
            return Ok(None);
        }

        match event::read().map_err(|e| TerminalError::Read(e.to_string()))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(map_key(key))),
            _ => Ok(None),
        }
    }

    fn read_key(&mut self) -> Result<Key, TerminalError> {
        loop {
            if let Event::Key(key) =
                event::read().map_err(|e| TerminalError::Read(e.to_string()))?
            {
                if key.kind == KeyEventKind::Press {
                    return Ok(map_key(key));
                }
            }
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), TerminalError> {
        write!(self.out, "\r{}", line)
            .and_then(|()| self.out.flush())
            .map_err(|e| TerminalError::Write(e.to_string()))
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore_mode() {
            warn!("Failed to restore terminal on drop: {}", e);
        }
    }
}

/// Maps a crossterm key event to a [`Key`].
fn map_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}
