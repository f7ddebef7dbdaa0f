//! Timer configuration.
//!
//! Settings are read from a JSON file. Every field has a default, so the file
//! is optional and may set only what it wants to change:
//!
//! ```json
//! {
//!   "alarm_sound": "/home/me/sounds/gong.wav",
//!   "notification_timeout_ms": 8000
//! }
//! ```
//!
//! The file is looked up at `$TIMER_BEETLE_CONFIG` if set, otherwise at
//! `<config dir>/timer-beetle/config.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "TIMER_BEETLE_CONFIG";

/// Environment variable that disables colors when set.
pub const NO_COLOR_ENV_VAR: &str = "NO_COLOR";

const CONFIG_DIR_NAME: &str = "timer-beetle";
const CONFIG_FILE_NAME: &str = "config.json";
const ASSETS_DIR_NAME: &str = "assets";

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("could not read config file {path}: {message}")]
    Read { path: String, message: String },

    /// The file is not valid configuration JSON.
    #[error("invalid config file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Directory holding the bundled alarm sound and icon.
fn default_assets_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ASSETS_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(ASSETS_DIR_NAME))
}

fn default_alarm_sound() -> PathBuf {
    default_assets_dir().join("alarm_sound.wav")
}

fn default_icon() -> PathBuf {
    default_assets_dir().join("icon.png")
}

fn default_notification_timeout_ms() -> u64 {
    5000
}

fn default_color() -> bool {
    true
}

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BeetleConfig {
    /// Sound file played when the countdown finishes.
    #[serde(default = "default_alarm_sound")]
    pub alarm_sound: PathBuf,

    /// Icon shown in the completion notification.
    #[serde(default = "default_icon")]
    pub icon: PathBuf,

    /// How long the completion notification stays on screen.
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,

    /// Whether to color terminal output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for BeetleConfig {
    fn default() -> Self {
        Self {
            alarm_sound: default_alarm_sound(),
            icon: default_icon(),
            notification_timeout_ms: default_notification_timeout_ms(),
            color: default_color(),
        }
    }
}

impl BeetleConfig {
    /// Returns the config file location, if one can be determined.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration, falling back to defaults on any problem.
    ///
    /// A missing file is normal; an unreadable or invalid one is logged.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            debug!("No config directory, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Loads the configuration from `path`.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid configuration JSON.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Returns the notification timeout.
    #[must_use]
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }

    /// Decides whether output should be colored.
    ///
    /// Colors need the config flag, no `NO_COLOR` in the environment and a
    /// terminal on standard output.
    #[must_use]
    pub fn use_color(&self, no_color_set: bool, stdout_is_terminal: bool) -> bool {
        self.color && !no_color_set && stdout_is_terminal
    }
}
