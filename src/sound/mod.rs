//! Sound playback for the completion alarm.
//!
//! Playback is fire-and-forget: [`SoundPlayer::play`] starts the sound and
//! returns immediately. Failures are reported to the caller, who is expected
//! to log them and carry on.

mod error;
mod player;

pub use error::SoundError;
pub use player::CommandSoundPlayer;

use std::path::{Path, PathBuf};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., an external player, mock for testing).
pub trait SoundPlayer {
    /// Starts playing the sound file at `path`.
    ///
    /// This method must not block until playback ends.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot be started.
    fn play(&self, path: &Path) -> Result<(), SoundError>;
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<PathBuf>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<PathBuf> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let player = MockSoundPlayer::new();
        player.play(Path::new("/a.wav")).unwrap();
        player.play(Path::new("/b.wav")).unwrap();
        assert_eq!(player.play_count(), 2);
        assert_eq!(
            player.get_play_calls(),
            vec![PathBuf::from("/a.wav"), PathBuf::from("/b.wav")]
        );
    }

    #[test]
    fn test_mock_failure() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);
        assert!(player.play(Path::new("/a.wav")).is_err());
        assert_eq!(player.play_count(), 0);
    }
}
