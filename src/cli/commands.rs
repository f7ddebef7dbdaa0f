//! Command definitions for the timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::Parser;

// ============================================================================
// CLI Structure
// ============================================================================

/// Timer Beetle - a terminal countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "timer-beetle",
    version,
    about = "Terminal countdown timer. Hit Space to pause and resume.",
    long_about = "Counts down in the terminal and bites (plays an alarm and shows a \
                  notification) when time is up.\n\n\
                  Examples:\n  \
                  timer-beetle 25          25 minutes\n  \
                  timer-beetle 1h30m       1 hour 30 minutes\n  \
                  timer-beetle 1d 12h      1 day 12 hours\n  \
                  timer-beetle 90s         90 seconds"
)]
pub struct Cli {
    /// Duration: plain minutes ("25") or units d/h/m/s ("1h30m", "1h 30m")
    #[arg(value_name = "DURATION", trailing_var_arg = true, allow_hyphen_values = true)]
    pub duration: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================
