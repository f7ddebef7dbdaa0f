//! Completion alert: alarm sound plus desktop notification.

mod error;

pub use error::AlertError;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::BeetleConfig;
use crate::notification::{CommandNotificationSender, Notification, NotificationSender};
use crate::sound::{CommandSoundPlayer, SoundPlayer};

/// Something that tells the user a countdown has finished.
pub trait AlertSink {
    /// Fires the alert for a countdown that finished at `finished_at`.
    ///
    /// Must not block until the alert is dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error if part of the alert could not be raised.
    fn alert(&self, finished_at: &DateTime<Local>) -> Result<(), AlertError>;
}

impl<A: AlertSink + ?Sized> AlertSink for &A {
    fn alert(&self, finished_at: &DateTime<Local>) -> Result<(), AlertError> {
        (**self).alert(finished_at)
    }
}

// ============================================================================
// DesktopAlert
// ============================================================================

/// Plays the alarm sound and raises a notification.
///
/// Both parts are always attempted; a failing sound does not suppress the
/// notification.
#[derive(Debug)]
pub struct DesktopAlert<S: SoundPlayer, N: NotificationSender> {
    sound: S,
    notifier: N,
    alarm_sound: PathBuf,
    icon: PathBuf,
    timeout: Duration,
}

impl<S: SoundPlayer, N: NotificationSender> DesktopAlert<S, N> {
    /// Creates an alert from its parts.
    pub fn new(
        sound: S,
        notifier: N,
        alarm_sound: impl Into<PathBuf>,
        icon: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            sound,
            notifier,
            alarm_sound: alarm_sound.into(),
            icon: icon.into(),
            timeout,
        }
    }

    /// Returns the alarm sound file.
    pub fn alarm_sound(&self) -> &Path {
        &self.alarm_sound
    }

    /// Returns the notification icon file.
    pub fn icon(&self) -> &Path {
        &self.icon
    }

    pub fn sound_player(&self) -> &S {
        &self.sound
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl DesktopAlert<CommandSoundPlayer, CommandNotificationSender> {
    /// Creates the platform alert with assets and timeout from `config`.
    #[must_use]
    pub fn from_config(config: &BeetleConfig) -> Self {
        Self::new(
            CommandSoundPlayer::default(),
            CommandNotificationSender::new(),
            &config.alarm_sound,
            &config.icon,
            config.notification_timeout(),
        )
    }
}

impl<S: SoundPlayer, N: NotificationSender> AlertSink for DesktopAlert<S, N> {
    fn alert(&self, finished_at: &DateTime<Local>) -> Result<(), AlertError> {
        let hms = finished_at.format("%H:%M:%S").to_string();
        info!("Alerting: countdown finished at {}", hms);

        let sound = self.sound.play(&self.alarm_sound);
        if let Err(e) = &sound {
            warn!("Alarm sound failed: {} ({})", e, e.suggestion());
        }

        let notification = Notification::completion(&hms, &self.icon, self.timeout);
        let notified = self.notifier.send(&notification);
        if let Err(e) = &notified {
            warn!("Notification failed: {}", e);
        }

        match (sound, notified) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(sound), Ok(())) => Err(sound.into()),
            (Ok(()), Err(notification)) => Err(notification.into()),
            (Err(sound), Err(notification)) => Err(AlertError::Both {
                sound,
                notification,
            }),
        }
    }
}

// ============================================================================
// MockAlertSink
// ============================================================================

/// Mock alert sink for testing.
#[derive(Debug, Default)]
pub struct MockAlertSink {
    alerts: std::sync::Mutex<Vec<DateTime<Local>>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockAlertSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    #[must_use]
    pub fn alerted_at(&self) -> Vec<DateTime<Local>> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for MockAlertSink {
    fn alert(&self, finished_at: &DateTime<Local>) -> Result<(), AlertError> {
        self.alerts.lock().unwrap().push(*finished_at);
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(AlertError::Sound(crate::sound::SoundError::PlaybackError(
                "Mock failure".to_string(),
            )));
        }
        Ok(())
    }
}
