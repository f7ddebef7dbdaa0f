//! Timer Beetle Library
//!
//! This library provides the core functionality for the Timer Beetle CLI.
//! It includes:
//! - Duration expression parsing ("25", "1h30m", "1d 12h")
//! - Countdown engine with pause/resume and a live status line
//! - Terminal raw-mode and key handling
//! - Alarm sound and desktop notification on completion
//! - Configuration file loading
//! - CLI argument parsing and display utilities

pub mod alert;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod duration;
pub mod notification;
pub mod sound;
pub mod terminal;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    CompletionEvent, CountdownPhase, CountdownState, Unit, RESUME_CORRECTION_SECONDS,
    TICK_INTERVAL,
};

pub use alert::{AlertError, AlertSink, DesktopAlert, MockAlertSink};
pub use config::{BeetleConfig, ConfigError};
pub use countdown::{
    Clock, CountdownEngine, CountdownError, CountdownEvent, MockClock, TokioClock,
};
pub use duration::DurationError;
pub use notification::{
    CommandNotificationSender, MockNotificationSender, Notification, NotificationError,
    NotificationSender,
};
pub use sound::{CommandSoundPlayer, MockSoundPlayer, SoundError, SoundPlayer};
pub use terminal::{CrosstermTerminal, Key, MockTerminal, RawModeGuard, TerminalError, TerminalIo};
