//! Timer Beetle - a terminal countdown timer
//!
//! Give it a duration, watch it count down, hit Space to pause and resume.
//! When time is up it plays an alarm and raises a desktop notification.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;

use timer_beetle::cli::{Cli, Display};
use timer_beetle::config::{BeetleConfig, NO_COLOR_ENV_VAR};
use timer_beetle::countdown::{CountdownEngine, CountdownError, TokioClock};
use timer_beetle::terminal::CrosstermTerminal;
use timer_beetle::{duration, CompletionEvent, DesktopAlert};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    let config = BeetleConfig::load();
    let display = Display::new(config.use_color(
        std::env::var_os(NO_COLOR_ENV_VAR).is_some(),
        std::io::stdout().is_terminal(),
    ));

    let seconds = match duration::parse(&cli.duration) {
        Ok(seconds) => seconds,
        Err(e) => {
            display.show_parse_error(&e);
            std::process::exit(1);
        }
    };

    match execute(seconds, &config, display).await {
        Ok(event) => display.show_finished(&event.finished_at_hms()),
        Err(e) => {
            let countdown_error = e.downcast_ref::<CountdownError>();
            // Move off the status line unless nothing was drawn.
            if !matches!(countdown_error, Some(CountdownError::TerminalUnavailable(_))) {
                println!();
            }
            Display::show_error(&format!("{:#}", e));
            std::process::exit(countdown_error.map_or(1, CountdownError::exit_code));
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Runs the countdown on the real terminal and clock.
async fn execute(seconds: u64, config: &BeetleConfig, display: Display) -> Result<CompletionEvent> {
    tracing::info!("Counting down {} seconds", seconds);

    let engine = CountdownEngine::new(display, DesktopAlert::from_config(config));
    let mut terminal = CrosstermTerminal::new();

    let event = engine
        .run(seconds, &mut terminal, &TokioClock)
        .await
        .context("countdown aborted")?;

    Ok(event)
}

// ============================================================================
// Tests
// ============================================================================
