//! Alert error types.

use thiserror::Error;

use crate::notification::NotificationError;
use crate::sound::SoundError;

/// Errors raised while alerting the user that a countdown finished.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The alarm sound could not be started.
    #[error(transparent)]
    Sound(#[from] SoundError),

    /// The desktop notification could not be raised.
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// Neither the sound nor the notification worked.
    #[error("{sound}; {notification}")]
    Both {
        sound: SoundError,
        notification: NotificationError,
    },
}
