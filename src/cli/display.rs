//! Display utilities for the timer CLI.
//!
//! This module provides formatted output for:
//! - The live countdown line (overwritten in place every tick)
//! - The paused indicator
//! - The completion line
//! - Parse and runtime error messages
//!
//! All styling goes through [`Display`], which is built once with a color
//! flag; with colors off every escape sequence is empty.

use crate::duration::DurationError;

/// Width of the clock segment of a countdown line, fill included.
const CLOCK_SEGMENT_WIDTH: usize = 25;

// ============================================================================
// Palette
// ============================================================================

/// ANSI escape sequences used by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    bright_yellow: &'static str,
    bright_green: &'static str,
    yellow: &'static str,
    blinking: &'static str,
    inverted: &'static str,
    dim: &'static str,
    reset: &'static str,
}

impl Palette {
    const ANSI: Palette = Palette {
        bright_yellow: "\x1b[93m",
        bright_green: "\x1b[92m",
        yellow: "\x1b[33m",
        blinking: "\x1b[5m",
        inverted: "\x1b[7m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    const PLAIN: Palette = Palette {
        bright_yellow: "",
        bright_green: "",
        yellow: "",
        blinking: "",
        inverted: "",
        dim: "",
        reset: "",
    };
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    palette: Palette,
}

impl Default for Display {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Display {
    /// Creates a display, with ANSI colors when `color` is true.
    #[must_use]
    pub fn new(color: bool) -> Self {
        let palette = if color { Palette::ANSI } else { Palette::PLAIN };
        Self { palette }
    }

    /// Returns true if this display emits ANSI colors.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.palette == Palette::ANSI
    }

    /// Formats remaining seconds as the shortest clock that fits:
    /// `DD:HH:MM:SS`, `HH:MM:SS` or `MM:SS`.
    ///
    /// Day counts above 99 are shown as `>99`.
    #[must_use]
    pub fn format_remaining(total_seconds: u64) -> String {
        let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        let (days, hours) = (hours / 24, hours % 24);

        if days > 99 {
            format!(">99:{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else if days > 0 {
            format!("{:02}:{:02}:{:02}:{:02}", days, hours, minutes, seconds)
        } else if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }

    /// Builds the countdown line for the given remaining seconds.
    ///
    /// The mascot faces right on even seconds and left on odd ones, so it
    /// scurries back and forth while the countdown runs.
    #[must_use]
    pub fn countdown_line(&self, remaining_seconds: u64) -> String {
        let p = &self.palette;
        let clock = Self::format_remaining(remaining_seconds);
        let fill = "#".repeat(CLOCK_SEGMENT_WIDTH.saturating_sub(clock.len() + 4));
        let mascot = if remaining_seconds % 2 == 0 {
            "/>w>/"
        } else {
            "\\<w<\\"
        };

        format!(
            "# {}{}{} {} {}{}{} Hit Space to pause.{}",
            p.inverted,
            clock,
            p.reset,
            fill,
            self.beetle(mascot),
            p.reset,
            p.dim,
            p.reset
        )
    }

    /// Builds the paused indicator line.
    #[must_use]
    pub fn paused_line(&self) -> String {
        let p = &self.palette;
        format!(
            "{}#{} Hit Space to resume. {}{}{}{}",
            p.bright_yellow,
            p.blinking,
            p.reset,
            self.beetle(",uwu,"),
            p.reset,
            " ".repeat(22)
        )
    }

    /// Builds the completion line shown once the countdown reaches zero.
    #[must_use]
    pub fn finished_line(&self, finished_at_hms: &str) -> String {
        let p = &self.palette;
        format!(
            "*Timer beetle BITES!* {}{}{} (@ {}){}{}",
            self.beetle("\\OwO/"),
            p.reset,
            p.dim,
            finished_at_hms,
            p.reset,
            " ".repeat(10)
        )
    }

    /// Builds the user-facing message for a duration parse failure.
    #[must_use]
    pub fn parse_error_message(&self, error: &DurationError) -> String {
        let p = &self.palette;
        let (headline, face) = match error {
            DurationError::MissingInput => ("Missing input!", ",?w?,"),
            DurationError::Malformed(_) => ("Bad input!", ",>w<,"),
            DurationError::DuplicateUnit(_) => ("Repeated units in input!", ",¬w¬,"),
            DurationError::OutOfRange(_) => ("Way too long!", ",OwO,"),
        };
        format!(
            "ERROR: {} {}{} {}",
            headline,
            self.beetle(face),
            p.reset,
            error.suggestion()
        )
    }

    /// Shows the completion line over the last countdown line.
    pub fn show_finished(&self, finished_at_hms: &str) {
        println!("\r{}", self.finished_line(finished_at_hms));
    }

    /// Shows a duration parse failure on standard output.
    pub fn show_parse_error(&self, error: &DurationError) {
        println!("{}", self.parse_error_message(error));
    }

    /// Shows a runtime error message.
    pub fn show_error(message: &str) {
        eprintln!("ERROR: {}", message);
    }

    /// Colors a beetle face, alternating green and yellow per character.
    fn beetle(&self, face: &str) -> String {
        let p = &self.palette;
        face.chars()
            .enumerate()
            .map(|(i, c)| {
                let color = if i % 2 == 0 { p.bright_green } else { p.yellow };
                format!("{}{}", color, c)
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
