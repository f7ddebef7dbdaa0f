//! Countdown engine for the timer.
//!
//! This module provides the interactive countdown:
//! - One tick per second, rendered as a status line that overwrites itself
//! - Pause on the space key (polled without blocking once per tick)
//! - Blocking wait for the resume key while paused
//! - Alert (sound + notification) once the countdown reaches zero
//! - Optional progress events over a channel
//!
//! The loop is single-threaded: it only ever suspends in [`Clock::sleep`]
//! while running and in [`TerminalIo::read_key`] while paused.

mod clock;
mod error;

pub use clock::{Clock, MockClock, TokioClock};
pub use error::{CountdownError, INTERRUPTED_EXIT_CODE};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::alert::AlertSink;
use crate::cli::Display;
use crate::terminal::{Key, RawModeGuard, TerminalIo};
use crate::types::{CompletionEvent, CountdownPhase, CountdownState, TICK_INTERVAL};

// ============================================================================
// CountdownEvent
// ============================================================================

/// Progress events published while a countdown runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// The countdown started
    Started {
        /// Seconds to count down from
        initial_seconds: u64,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u64,
    },
    /// The countdown was paused
    Paused {
        /// Remaining seconds at the moment of pausing
        remaining_seconds: u64,
    },
    /// The countdown was resumed
    Resumed {
        /// Remaining seconds after the resume correction
        remaining_seconds: u64,
    },
    /// The countdown reached zero
    Finished {
        /// Number of ticks that elapsed
        ticks: u64,
    },
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown engine that drives one countdown from start to alert.
pub struct CountdownEngine<A: AlertSink> {
    /// Status line formatting
    display: Display,
    /// Called once when the countdown finishes
    alert: A,
    /// Event sender channel
    event_tx: Option<mpsc::UnboundedSender<CountdownEvent>>,
}

impl<A: AlertSink> CountdownEngine<A> {
    /// Creates a new engine rendering with `display` and alerting through `alert`.
    pub fn new(display: Display, alert: A) -> Self {
        Self {
            display,
            alert,
            event_tx: None,
        }
    }

    /// Publishes progress events to `event_tx`.
    ///
    /// A closed receiver does not affect the countdown.
    #[must_use]
    pub fn with_event_sender(mut self, event_tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Returns the alert sink.
    pub fn alert_sink(&self) -> &A {
        &self.alert
    }

    /// Counts down from `initial_seconds` to zero.
    ///
    /// Raw mode is held on `terminal` for the whole countdown and restored
    /// before this returns, whatever the outcome. The alert fires only on
    /// normal completion, after the terminal has been restored.
    ///
    /// # Errors
    ///
    /// - [`CountdownError::TerminalUnavailable`] if raw mode cannot be enabled
    /// - [`CountdownError::Input`] if reading the resume key fails
    /// - [`CountdownError::Interrupted`] if Ctrl-C is pressed
    pub async fn run<T, C>(
        &self,
        initial_seconds: u64,
        terminal: &mut T,
        clock: &C,
    ) -> Result<CompletionEvent, CountdownError>
    where
        T: TerminalIo + ?Sized,
        C: Clock,
    {
        let state = {
            let mut terminal =
                RawModeGuard::acquire(terminal).map_err(CountdownError::TerminalUnavailable)?;

            info!("Countdown started: {}s", initial_seconds);
            self.emit(CountdownEvent::Started { initial_seconds });

            let mut state = CountdownState::new(initial_seconds);
            loop {
                match state.phase {
                    CountdownPhase::Running => {
                        self.step(&mut state, &mut *terminal, clock).await?;
                    }
                    CountdownPhase::Paused => {
                        self.wait_for_resume(&mut state, &mut *terminal)?;
                    }
                    CountdownPhase::Done => break,
                }
            }
            state
        };

        let finished_at = clock.now();
        info!(
            "Countdown finished after {} ticks and {} pauses",
            state.ticks, state.pauses
        );

        if let Err(e) = self.alert.alert(&finished_at) {
            warn!("Alert failed: {}", e);
        }
        self.emit(CountdownEvent::Finished { ticks: state.ticks });

        Ok(CompletionEvent {
            finished_at,
            ticks: state.ticks,
            pauses: state.pauses,
        })
    }

    /// Runs one iteration of the running phase.
    async fn step<T, C>(
        &self,
        state: &mut CountdownState,
        terminal: &mut T,
        clock: &C,
    ) -> Result<(), CountdownError>
    where
        T: TerminalIo + ?Sized,
        C: Clock,
    {
        if state.remaining_seconds == 0 {
            state.finish();
            return Ok(());
        }

        self.render(terminal, &self.display.countdown_line(state.remaining_seconds));

        match terminal.poll_key() {
            Ok(Some(key)) if key.is_pause_toggle() => {
                state.pause();
                debug!("Paused at {}s", state.remaining_seconds);
                self.emit(CountdownEvent::Paused {
                    remaining_seconds: state.remaining_seconds,
                });
                return Ok(());
            }
            Ok(Some(Key::Interrupt)) => return Err(CountdownError::Interrupted),
            Ok(_) => {}
            Err(e) => debug!("Key poll failed, treating as no key: {}", e),
        }

        clock.sleep(TICK_INTERVAL).await;
        state.tick();
        self.emit(CountdownEvent::Tick {
            remaining_seconds: state.remaining_seconds,
        });
        Ok(())
    }

    /// Blocks until the resume key is read, then resumes.
    fn wait_for_resume<T>(
        &self,
        state: &mut CountdownState,
        terminal: &mut T,
    ) -> Result<(), CountdownError>
    where
        T: TerminalIo + ?Sized,
    {
        self.render(terminal, &self.display.paused_line());

        loop {
            match terminal.read_key().map_err(CountdownError::Input)? {
                key if key.is_pause_toggle() => break,
                Key::Interrupt => return Err(CountdownError::Interrupted),
                _ => {}
            }
        }

        state.resume();
        debug!("Resumed at {}s", state.remaining_seconds);
        self.emit(CountdownEvent::Resumed {
            remaining_seconds: state.remaining_seconds,
        });
        Ok(())
    }

    fn render<T: TerminalIo + ?Sized>(&self, terminal: &mut T, line: &str) {
        if let Err(e) = terminal.write_line(line) {
            debug!("Status line not written: {}", e);
        }
    }

    fn emit(&self, event: CountdownEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockAlertSink;
    use crate::terminal::{MockTerminal, TerminalError};
    use crate::types::RESUME_CORRECTION_SECONDS;

    fn create_engine(alert: &MockAlertSink) -> CountdownEngine<&MockAlertSink> {
        CountdownEngine::new(Display::new(false), alert)
    }

    fn create_engine_with_events(
        alert: &MockAlertSink,
    ) -> (
        CountdownEngine<&MockAlertSink>,
        mpsc::UnboundedReceiver<CountdownEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (create_engine(alert).with_event_sender(tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<CountdownEvent>) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Running Tests
    // ------------------------------------------------------------------------

    mod running_tests {
        use super::*;

        #[tokio::test]
        async fn test_counts_down_exactly_n_ticks() {
            let alert = MockAlertSink::new();
            let (engine, mut rx) = create_engine_with_events(&alert);
            let mut terminal = MockTerminal::new();
            let clock = MockClock::default();

            let event = engine.run(5, &mut terminal, &clock).await.unwrap();

            assert_eq!(event.ticks, 5);
            assert_eq!(clock.sleeps(), vec![TICK_INTERVAL; 5]);

            let ticks: Vec<u64> = drain(&mut rx)
                .into_iter()
                .filter_map(|e| match e {
                    CountdownEvent::Tick { remaining_seconds } => Some(remaining_seconds),
                    _ => None,
                })
                .collect();
            assert_eq!(ticks, vec![4, 3, 2, 1, 0]);
        }

        #[tokio::test]
        async fn test_renders_once_per_tick() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new();

            engine
                .run(3, &mut terminal, &MockClock::default())
                .await
                .unwrap();

            let display = Display::new(false);
            assert_eq!(
                terminal.lines(),
                [
                    display.countdown_line(3),
                    display.countdown_line(2),
                    display.countdown_line(1),
                ]
            );
        }

        #[tokio::test]
        async fn test_zero_seconds_finishes_immediately() {
            let alert = MockAlertSink::new();
            let (engine, mut rx) = create_engine_with_events(&alert);
            let mut terminal = MockTerminal::new();
            let clock = MockClock::default();

            let event = engine.run(0, &mut terminal, &clock).await.unwrap();

            assert_eq!(event.ticks, 0);
            assert_eq!(clock.sleep_count(), 0);
            assert!(terminal.lines().is_empty());
            assert_eq!(
                drain(&mut rx),
                vec![
                    CountdownEvent::Started { initial_seconds: 0 },
                    CountdownEvent::Finished { ticks: 0 },
                ]
            );
            assert_eq!(alert.alert_count(), 1);
        }

        #[tokio::test]
        async fn test_non_pause_keys_are_ignored() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal =
                MockTerminal::new().with_polls([Some(Key::Char('p')), Some(Key::Other)]);
            let clock = MockClock::default();

            let event = engine.run(2, &mut terminal, &clock).await.unwrap();

            assert_eq!(event.ticks, 2);
            assert_eq!(event.pauses, 0);
        }

        #[tokio::test]
        async fn test_poll_error_counts_as_no_key() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal =
                MockTerminal::new().with_poll_error(TerminalError::Read("flaky".into()));
            let clock = MockClock::default();

            let event = engine.run(2, &mut terminal, &clock).await.unwrap();

            assert_eq!(event.ticks, 2);
            assert_eq!(clock.sleep_count(), 2);
        }

        #[tokio::test]
        async fn test_completion_uses_clock_time() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let now = chrono::Local::now();
            let clock = MockClock::new(now);

            let event = engine
                .run(1, &mut MockTerminal::new(), &clock)
                .await
                .unwrap();

            assert_eq!(event.finished_at, now);
            assert_eq!(alert.alerted_at(), vec![now]);
        }
    }

    // ------------------------------------------------------------------------
    // Pause Tests
    // ------------------------------------------------------------------------

    mod pause_tests {
        use super::*;

        #[tokio::test]
        async fn test_pause_resume_adds_correction() {
            let alert = MockAlertSink::new();
            let (engine, mut rx) = create_engine_with_events(&alert);
            // Tick once, then pause at 2 seconds remaining.
            let mut terminal = MockTerminal::new()
                .with_polls([None, Some(Key::Char(' '))])
                .with_reads([Key::Char(' ')]);
            let clock = MockClock::default();

            let event = engine.run(3, &mut terminal, &clock).await.unwrap();

            let events = drain(&mut rx);
            assert_eq!(
                &events[..4],
                &[
                    CountdownEvent::Started { initial_seconds: 3 },
                    CountdownEvent::Tick {
                        remaining_seconds: 2
                    },
                    CountdownEvent::Paused {
                        remaining_seconds: 2
                    },
                    CountdownEvent::Resumed {
                        remaining_seconds: 2 + RESUME_CORRECTION_SECONDS
                    },
                ]
            );
            assert_eq!(event.pauses, 1);
            assert_eq!(event.ticks, 1 + 2 + RESUME_CORRECTION_SECONDS);
        }

        #[tokio::test]
        async fn test_no_sleep_while_paused() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new()
                .with_polls([Some(Key::Char(' '))])
                .with_reads([Key::Char('a'), Key::Other, Key::Char(' ')]);
            let clock = MockClock::default();

            let event = engine.run(1, &mut terminal, &clock).await.unwrap();

            // 1 + 2 seconds after resume, none consumed by the pause itself.
            assert_eq!(clock.sleep_count(), 3);
            assert_eq!(event.ticks, 3);
        }

        #[tokio::test]
        async fn test_paused_line_rendered_once() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new()
                .with_polls([Some(Key::Char(' '))])
                .with_reads([Key::Char('x'), Key::Char('y'), Key::Char(' ')]);

            engine
                .run(1, &mut terminal, &MockClock::default())
                .await
                .unwrap();

            let paused = Display::new(false).paused_line();
            let count = terminal.lines().iter().filter(|l| **l == paused).count();
            assert_eq!(count, 1);
        }

        #[tokio::test]
        async fn test_multiple_pauses() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new()
                .with_polls([Some(Key::Char(' ')), Some(Key::Char(' '))])
                .with_reads([Key::Char(' '), Key::Char(' ')]);

            let event = engine
                .run(1, &mut terminal, &MockClock::default())
                .await
                .unwrap();

            assert_eq!(event.pauses, 2);
            assert_eq!(event.ticks, 1 + 2 * RESUME_CORRECTION_SECONDS);
        }
    }

    // ------------------------------------------------------------------------
    // Failure Tests
    // ------------------------------------------------------------------------

    mod failure_tests {
        use super::*;

        #[tokio::test]
        async fn test_raw_mode_failure_runs_nothing() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new().with_raw_mode_failure();
            let clock = MockClock::default();

            let result = engine.run(10, &mut terminal, &clock).await;

            assert!(matches!(
                result,
                Err(CountdownError::TerminalUnavailable(TerminalError::RawMode(_)))
            ));
            assert_eq!(clock.sleep_count(), 0);
            assert!(terminal.lines().is_empty());
            assert_eq!(alert.alert_count(), 0);
        }

        #[tokio::test]
        async fn test_read_error_while_paused_restores_terminal() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new()
                .with_polls([Some(Key::Char(' '))])
                .with_read_error(TerminalError::Read("closed".into()));

            let result = engine.run(10, &mut terminal, &MockClock::default()).await;

            assert_eq!(
                result,
                Err(CountdownError::Input(TerminalError::Read("closed".into())))
            );
            assert!(!terminal.is_raw());
            assert_eq!(terminal.restore_calls(), 1);
            assert_eq!(alert.alert_count(), 0);
        }

        #[tokio::test]
        async fn test_interrupt_while_running() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new().with_polls([None, Some(Key::Interrupt)]);
            let clock = MockClock::default();

            let result = engine.run(10, &mut terminal, &clock).await;

            assert_eq!(result, Err(CountdownError::Interrupted));
            assert_eq!(clock.sleep_count(), 1);
            assert!(!terminal.is_raw());
            assert_eq!(alert.alert_count(), 0);
        }

        #[tokio::test]
        async fn test_interrupt_while_paused() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new()
                .with_polls([Some(Key::Char(' '))])
                .with_reads([Key::Interrupt]);

            let result = engine.run(10, &mut terminal, &MockClock::default()).await;

            assert_eq!(result, Err(CountdownError::Interrupted));
            assert!(!terminal.is_raw());
        }

        #[tokio::test]
        async fn test_alert_failure_does_not_fail_countdown() {
            let alert = MockAlertSink::new();
            alert.set_should_fail(true);
            let engine = create_engine(&alert);

            let result = engine
                .run(1, &mut MockTerminal::new(), &MockClock::default())
                .await;

            assert!(result.is_ok());
            assert_eq!(alert.alert_count(), 1);
        }

        #[tokio::test]
        async fn test_dropped_receiver_does_not_fail_countdown() {
            let alert = MockAlertSink::new();
            let (engine, rx) = create_engine_with_events(&alert);
            drop(rx);

            let result = engine
                .run(2, &mut MockTerminal::new(), &MockClock::default())
                .await;

            assert!(result.is_ok());
        }

        #[tokio::test]
        async fn test_terminal_restored_after_completion() {
            let alert = MockAlertSink::new();
            let engine = create_engine(&alert);
            let mut terminal = MockTerminal::new();

            engine
                .run(2, &mut terminal, &MockClock::default())
                .await
                .unwrap();

            assert_eq!(terminal.enable_calls(), 1);
            assert_eq!(terminal.restore_calls(), 1);
            assert!(!terminal.is_raw());
        }
    }
}
