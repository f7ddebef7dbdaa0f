//! Notification content construction.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Title used where the platform shows one.
pub const APP_TITLE: &str = "Timer Beetle";

/// Urgency hint passed to `notify-send -u`.
pub const URGENCY: &str = "normal";

/// A desktop notification ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text of the notification
    pub message: String,
    /// Icon shown next to the text
    pub icon: PathBuf,
    /// How long the notification stays on screen
    pub timeout: Duration,
}

impl Notification {
    /// Builds the notification raised when a countdown finishes.
    #[must_use]
    pub fn completion(finished_at_hms: &str, icon: &Path, timeout: Duration) -> Self {
        Self {
            message: format!("\\OwO/\n*Timer beetle BITES!* (@ {})", finished_at_hms),
            icon: icon.to_path_buf(),
            timeout,
        }
    }

    /// Returns the timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u128 {
        self.timeout.as_millis()
    }
}
