//! Desktop notifications.
//!
//! Notifications are raised by spawning the platform's notification tool
//! (`notify-send` on Linux and BSD, `osascript` on macOS) and not waiting for
//! it. A missing tool is reported as [`NotificationError::NotAvailable`] so
//! callers can log it and move on.

mod content;
mod error;

pub use content::{Notification, APP_TITLE, URGENCY};
pub use error::NotificationError;

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use tracing::debug;

/// Trait for notification sending implementations.
pub trait NotificationSender {
    /// Raises `notification` without waiting for it to be dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be handed off.
    fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

// ============================================================================
// CommandNotificationSender
// ============================================================================

/// Sends notifications through the platform's command-line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandNotificationSender;

impl CommandNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[cfg(not(target_os = "macos"))]
    fn program(&self) -> &'static str {
        "notify-send"
    }

    #[cfg(target_os = "macos")]
    fn program(&self) -> &'static str {
        "osascript"
    }

    /// Builds the argument list for `notify-send`.
    #[cfg(not(target_os = "macos"))]
    fn args(&self, notification: &Notification) -> Vec<String> {
        vec![
            "-t".to_string(),
            notification.timeout_ms().to_string(),
            "-u".to_string(),
            URGENCY.to_string(),
            "-i".to_string(),
            notification.icon.display().to_string(),
            notification.message.clone(),
        ]
    }

    /// Builds the argument list for `osascript`.
    ///
    /// macOS ignores the icon and timeout of script notifications.
    #[cfg(target_os = "macos")]
    fn args(&self, notification: &Notification) -> Vec<String> {
        let escape = |s: &str| s.replace('\\', "\\\\").replace('"', "\\\"");
        vec![
            "-e".to_string(),
            format!(
                "display notification \"{}\" with title \"{}\"",
                escape(&notification.message),
                escape(APP_TITLE)
            ),
        ]
    }
}

impl NotificationSender for CommandNotificationSender {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let program = self.program();
        Command::new(program)
            .args(self.args(notification))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => NotificationError::NotAvailable(program.to_string()),
                _ => NotificationError::SendFailed(format!("{}: {}", program, e)),
            })?;

        debug!("Notification sent via {}", program);
        Ok(())
    }
}

// ============================================================================
// MockNotificationSender
// ============================================================================

/// Mock notification sender for testing.
#[derive(Debug, Default)]
pub struct MockNotificationSender {
    notifications: std::sync::Mutex<Vec<Notification>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl NotificationSender for MockNotificationSender {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }
}
