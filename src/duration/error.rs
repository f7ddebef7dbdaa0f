//! Duration parsing error types.

use thiserror::Error;

use crate::types::Unit;

/// Errors that can occur while parsing a duration expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// No duration was supplied at all.
    #[error("missing input")]
    MissingInput,

    /// The expression matches neither plain minutes nor the multi-unit grammar.
    #[error("bad input: '{0}'")]
    Malformed(String),

    /// A unit appeared more than once in a multi-unit expression.
    #[error("repeated {0} unit in input")]
    DuplicateUnit(Unit),

    /// The total does not fit in a second counter.
    #[error("duration '{0}' is too large")]
    OutOfRange(String),
}

impl DurationError {
    /// Returns true if the user supplied nothing to parse.
    #[must_use]
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput)
    }

    /// Returns true if the expression shape was rejected.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns true if a unit was repeated.
    #[must_use]
    pub fn is_duplicate_unit(&self) -> bool {
        matches!(self, Self::DuplicateUnit(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::MissingInput => "Put like \"1h30m\" or just like \"25\" for minutes.",
            Self::Malformed(_) => "Do like \"1h30m\" or just like \"25\" for minutes.",
            Self::DuplicateUnit(_) => "Use each of d, h, m and s at most once.",
            Self::OutOfRange(_) => "Pick something shorter than the age of the universe.",
        }
    }
}
