#![forbid(unsafe_code)]

//! Rubric grid public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude, plus `Result`-returning checks for hosts that need to
//! validate rubric data outside a [`GridController`] (imports, API payloads).

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use rubric_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};

// --- Grid re-exports -------------------------------------------------------

pub use rubric_grid::{
    CommitOutcome, Criterion, CriterionDefaults, EditViolation, EventSink, Field, GridConfig,
    GridController, GridEvent, HighlightRequest, HighlightSignal, MissingField, Notification,
    NotificationIcon, Rubric, RubricId, RubricSnapshot, SaveOutcome, Score, ScoreParseError,
    Subscription,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for rubric checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Score text is not a non-negative integer.
    Score(ScoreParseError),
    /// The score breaks a cross-field invariant.
    Edit(EditViolation),
    /// Required text is empty; every offending cell in row order.
    MissingFields(Vec<MissingField>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(err) => write!(f, "{err}"),
            Self::Edit(err) => write!(f, "{err}"),
            Self::MissingFields(missing) => {
                write!(f, "{} required field(s) empty", missing.len())?;
                if let Some(first) = missing.first() {
                    write!(f, ", first at {first}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Score(err) => Some(err),
            Self::Edit(err) => Some(err),
            Self::MissingFields(_) => None,
        }
    }
}

impl From<ScoreParseError> for Error {
    fn from(err: ScoreParseError) -> Self {
        Self::Score(err)
    }
}

impl From<EditViolation> for Error {
    fn from(err: EditViolation) -> Self {
        Self::Edit(err)
    }
}

/// Standard result type for rubric checks.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse `text` as a new value for the score `field` of `criterion` and
/// check it against the score invariants.
pub fn check_score(field: Field, text: &str, criterion: &Criterion) -> Result<Score> {
    let score = rubric_grid::parse_score(text)?;
    rubric_grid::validate_edit(field, score, criterion)?;
    Ok(score)
}

/// Check that every criterion has a name and a description.
pub fn check_save(criteria: &[Criterion]) -> Result<()> {
    let missing = rubric_grid::validate_for_save(criteria);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingFields(missing))
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Criterion, Error, Event, Field, GridConfig, GridController, GridEvent, KeyCode, KeyEvent,
        Modifiers, Result, Rubric, RubricId, SaveOutcome,
    };

    pub use crate::{core, grid};
}

pub use rubric_core as core;
pub use rubric_grid as grid;
