//! Duration expression parsing.
//!
//! Turns the command-line words into a total number of seconds. Two shapes
//! are accepted:
//!
//! - Plain minutes: `25` is 25 minutes.
//! - Multi-unit: up to four `<digits><unit>` components with units `d`, `h`,
//!   `m` and `s`, in any order, optionally separated by spaces
//!   (`1h30m`, `30m 1h`, `1d12h30m30s`). Each unit may appear only once.
//!
//! All words are joined before parsing, so `1h 30m` given as two arguments
//! is the same as `1h30m`.
//!
//! # Example
//!
//! ```
//! use timer_beetle::duration::parse;
//!
//! assert_eq!(parse(&["25"]).unwrap(), 1500);
//! assert_eq!(parse(&["1h", "30m"]).unwrap(), 5400);
//! ```

mod error;

pub use error::DurationError;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::Unit;

/// Anchored multi-unit grammar: one to four components separated by spaces.
static MULTI_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]+[dhms]) *([0-9]+[dhms])? *([0-9]+[dhms])? *([0-9]+[dhms])? *$",
    )
    .expect("multi-unit grammar is a valid regex")
});

/// Parses command-line words into a total number of seconds.
///
/// # Errors
///
/// - [`DurationError::MissingInput`] if `tokens` is empty
/// - [`DurationError::Malformed`] if the joined words match neither grammar
/// - [`DurationError::DuplicateUnit`] if a unit is repeated
/// - [`DurationError::OutOfRange`] if the total overflows
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<u64, DurationError> {
    if tokens.is_empty() {
        return Err(DurationError::MissingInput);
    }

    let joined: String = tokens.iter().map(AsRef::as_ref).collect();

    if let Some(seconds) = parse_plain_minutes(&joined)? {
        debug!("Parsed '{}' as plain minutes: {}s", joined, seconds);
        return Ok(seconds);
    }

    let seconds = parse_multi_unit(&joined)?;
    debug!("Parsed '{}' as multi-unit: {}s", joined, seconds);
    Ok(seconds)
}

/// Returns the seconds for an all-digit expression, or `None` if the
/// expression is not all digits.
fn parse_plain_minutes(input: &str) -> Result<Option<u64>, DurationError> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }

    input
        .parse::<u64>()
        .ok()
        .and_then(|minutes| minutes.checked_mul(Unit::Minute.scale()))
        .map(Some)
        .ok_or_else(|| DurationError::OutOfRange(input.to_string()))
}

fn parse_multi_unit(input: &str) -> Result<u64, DurationError> {
    let lowered = input.to_lowercase();
    let captures = MULTI_UNIT
        .captures(&lowered)
        .ok_or_else(|| DurationError::Malformed(input.to_string()))?;

    let mut seen: Vec<Unit> = Vec::with_capacity(Unit::ALL.len());
    let mut total: u64 = 0;

    for component in captures.iter().skip(1).flatten() {
        let (amount, unit) = split_component(component.as_str())
            .ok_or_else(|| DurationError::Malformed(input.to_string()))?;

        if seen.contains(&unit) {
            return Err(DurationError::DuplicateUnit(unit));
        }
        seen.push(unit);

        total = amount
            .parse::<u64>()
            .ok()
            .and_then(|amount| amount.checked_mul(unit.scale()))
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(|| DurationError::OutOfRange(input.to_string()))?;
    }

    Ok(total)
}

/// Splits a matched component such as `12h` into its digits and unit.
fn split_component(component: &str) -> Option<(&str, Unit)> {
    let letter = component.chars().last()?;
    let unit = Unit::from_letter(letter)?;
    Some((&component[..component.len() - letter.len_utf8()], unit))
}

// ============================================================================
// Tests
// ============================================================================
