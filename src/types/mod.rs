//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Duration units and their scales
//! - Countdown state management (remaining time, phase)
//! - Completion reporting

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Interval between two countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Seconds added back to the remaining time on every resume.
pub const RESUME_CORRECTION_SECONDS: u64 = 2;

// ============================================================================
// Unit
// ============================================================================

/// A time unit usable in a multi-unit duration expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Day,
    Hour,
    Minute,
    Second,
}

impl Unit {
    /// All units, largest first.
    pub const ALL: [Unit; 4] = [Unit::Day, Unit::Hour, Unit::Minute, Unit::Second];

    /// Returns the unit for a lower-case unit letter (`d`, `h`, `m`, `s`).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'd' => Some(Unit::Day),
            'h' => Some(Unit::Hour),
            'm' => Some(Unit::Minute),
            's' => Some(Unit::Second),
            _ => None,
        }
    }

    /// Returns the number of seconds in one of this unit.
    pub fn scale(&self) -> u64 {
        match self {
            Unit::Day => 24 * 60 * 60,
            Unit::Hour => 60 * 60,
            Unit::Minute => 60,
            Unit::Second => 1,
        }
    }

    /// Returns the unit letter used in duration expressions.
    pub fn letter(&self) -> char {
        match self {
            Unit::Day => 'd',
            Unit::Hour => 'h',
            Unit::Minute => 'm',
            Unit::Second => 's',
        }
    }

    /// Returns the string representation of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CountdownPhase
// ============================================================================

/// Represents the current phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownPhase {
    /// Counting down, one tick per second
    #[default]
    Running,
    /// Waiting for the resume key
    Paused,
    /// Reached zero
    Done,
}

impl CountdownPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Running => "running",
            CountdownPhase::Paused => "paused",
            CountdownPhase::Done => "done",
        }
    }
}

// ============================================================================
// CountdownState
// ============================================================================

/// Represents the current state of a countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    /// Remaining seconds until completion
    pub remaining_seconds: u64,
    /// Current phase of the countdown
    pub phase: CountdownPhase,
    /// Number of completed ticks
    pub ticks: u64,
    /// Number of pauses taken so far
    pub pauses: u32,
}

impl CountdownState {
    /// Creates a new running state with the given number of seconds.
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            remaining_seconds: initial_seconds,
            phase: CountdownPhase::Running,
            ticks: 0,
            pauses: 0,
        }
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has reached 0. Has no effect unless
    /// running.
    pub fn tick(&mut self) -> bool {
        if self.phase == CountdownPhase::Running && self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            self.ticks += 1;
        }
        self.remaining_seconds == 0
    }

    /// Pauses the countdown.
    ///
    /// Only works while running.
    pub fn pause(&mut self) {
        if self.phase == CountdownPhase::Running {
            self.phase = CountdownPhase::Paused;
            self.pauses += 1;
        }
    }

    /// Resumes a paused countdown, giving back [`RESUME_CORRECTION_SECONDS`].
    pub fn resume(&mut self) {
        if self.phase == CountdownPhase::Paused {
            self.remaining_seconds = self
                .remaining_seconds
                .saturating_add(RESUME_CORRECTION_SECONDS);
            self.phase = CountdownPhase::Running;
        }
    }

    /// Marks the countdown as finished.
    pub fn finish(&mut self) {
        self.phase = CountdownPhase::Done;
    }

    /// Returns true if the countdown is actively running.
    pub fn is_running(&self) -> bool {
        self.phase == CountdownPhase::Running
    }

    /// Returns true if the countdown is paused.
    pub fn is_paused(&self) -> bool {
        self.phase == CountdownPhase::Paused
    }

    /// Returns true if the countdown has finished.
    pub fn is_done(&self) -> bool {
        self.phase == CountdownPhase::Done
    }
}

// ============================================================================
// CompletionEvent
// ============================================================================

/// Summary of a finished countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    /// Local time at which the countdown reached zero
    pub finished_at: DateTime<Local>,
    /// Number of ticks that elapsed
    pub ticks: u64,
    /// Number of pauses taken
    pub pauses: u32,
}

impl CompletionEvent {
    /// Returns the completion time formatted as `HH:MM:SS`.
    pub fn finished_at_hms(&self) -> String {
        self.finished_at.format("%H:%M:%S").to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
