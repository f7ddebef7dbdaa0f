//! Sound player that hands the file to an external program.
//!
//! The player process is spawned and left running, so the alarm keeps
//! playing after the timer process exits.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::error::SoundError;
use super::SoundPlayer;

#[cfg(target_os = "macos")]
const DEFAULT_PROGRAM: &str = "afplay";
#[cfg(target_os = "macos")]
const DEFAULT_ARGS: &[&str] = &[];

#[cfg(not(target_os = "macos"))]
const DEFAULT_PROGRAM: &str = "aplay";
#[cfg(not(target_os = "macos"))]
const DEFAULT_ARGS: &[&str] = &["-q"];

/// A sound player that spawns a command-line audio player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSoundPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandSoundPlayer {
    /// Creates a player running `program args... <file>`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Returns the program this player spawns.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandSoundPlayer {
    /// `aplay -q` (`afplay` on macOS).
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS)
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }

        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SoundError::PlayerNotFound(self.program.clone()),
                _ => SoundError::PlaybackError(format!("{}: {}", self.program, e)),
            })?;

        debug!("Sound playback started: {}", path.display());
        Ok(())
    }
}
