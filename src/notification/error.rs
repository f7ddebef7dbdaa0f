//! Notification system error types.

use thiserror::Error;

/// Errors that can occur when raising a desktop notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// The notification program is not installed.
    #[error("notification program '{0}' not found")]
    NotAvailable(String),

    /// Failed to start the notification program.
    #[error("failed to send notification: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns true if notifications cannot work on this system at all.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotAvailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::NotAvailable("notify-send".to_string());
        assert!(err.to_string().contains("notify-send"));

        let err = NotificationError::SendFailed("permission denied".to_string());
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_is_unavailable() {
        assert!(NotificationError::NotAvailable("x".into()).is_unavailable());
        assert!(!NotificationError::SendFailed("x".into()).is_unavailable());
    }
}
