#![forbid(unsafe_code)]

//! Validation engine: pure checks for single-cell edits and whole-rubric saves.
//!
//! Nothing here mutates state or emits notifications. The grid controller
//! turns the returned values into notifications and highlights.
//!
//! # Failure Modes
//!
//! | Scenario | Result |
//! |----------|--------|
//! | New min >= max | [`EditViolation::MinNotBelowMax`] |
//! | New max <= min | [`EditViolation::MaxNotAboveMin`] |
//! | Pass outside `[min, max]` after the edit | [`EditViolation::PassOutOfRange`] |
//! | Cell text not a non-negative integer | [`ScoreParseError`] (silently discarded) |
//! | Empty name/description at save | one [`MissingField`] per empty cell |

use std::fmt;

use crate::criterion::{Criterion, Field, Score};

/// Notification title for rejected cell edits.
pub const TITLE_INCORRECT_VALUE: &str = "Incorrect Value";
/// Notification title for a blocked save.
pub const TITLE_MISSING_FIELDS: &str = "Missing Required Fields";
/// Notification body for a blocked save.
pub const BODY_MISSING_FIELDS: &str =
    "Every criterion needs a name and a description before the rubric can be saved";

// ---------------------------------------------------------------------------
// EditViolation
// ---------------------------------------------------------------------------

/// Which score invariant a proposed edit would break.
///
/// The `Display` text is the user-facing notification body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditViolation {
    /// The new minimum is not strictly below the maximum.
    MinNotBelowMax,
    /// The new maximum is not strictly above the minimum.
    MaxNotAboveMin,
    /// The pass mark would fall outside `[min, max]`.
    PassOutOfRange,
}

impl EditViolation {
    /// Notification body for this violation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MinNotBelowMax => "Minimum score must be less than the maximum score",
            Self::MaxNotAboveMin => "Maximum score must be greater than the minimum score",
            Self::PassOutOfRange => "Pass mark must be between the minimum and maximum",
        }
    }
}

impl fmt::Display for EditViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EditViolation {}

/// Check a proposed score against the other scores of `criterion`.
///
/// Textual fields always pass. Besides the field's own bound, moving `min`
/// or `max` must not strand the pass mark outside the new range, so that
/// every committed criterion stays numerically valid.
pub fn validate_edit(field: Field, proposed: Score, criterion: &Criterion) -> Result<(), EditViolation> {
    let Criterion {
        min_score: min,
        max_score: max,
        pass_score: pass,
        ..
    } = *criterion;

    match field {
        Field::Name | Field::Description => Ok(()),
        Field::MinScore if proposed >= max => Err(EditViolation::MinNotBelowMax),
        Field::MinScore if pass < proposed => Err(EditViolation::PassOutOfRange),
        Field::MaxScore if proposed <= min => Err(EditViolation::MaxNotAboveMin),
        Field::MaxScore if pass > proposed => Err(EditViolation::PassOutOfRange),
        Field::PassScore if proposed < min || proposed > max => Err(EditViolation::PassOutOfRange),
        Field::MinScore | Field::MaxScore | Field::PassScore => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Score parsing
// ---------------------------------------------------------------------------

/// Why cell text could not become a [`Score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreParseError {
    /// Nothing but whitespace was entered.
    Empty,
    /// The text is not an integer.
    NotANumber,
    /// The integer is below zero.
    Negative,
    /// The integer does not fit in a [`Score`].
    OutOfRange,
}

impl fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "score is empty"),
            Self::NotANumber => write!(f, "score is not an integer"),
            Self::Negative => write!(f, "score is negative"),
            Self::OutOfRange => write!(f, "score exceeds {}", Score::MAX),
        }
    }
}

impl std::error::Error for ScoreParseError {}

/// Parse cell text as a non-negative integer score.
///
/// Surrounding whitespace is ignored.
pub fn parse_score(text: &str) -> Result<Score, ScoreParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ScoreParseError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(value) if value < 0 => Err(ScoreParseError::Negative),
        Ok(value) => Score::try_from(value).map_err(|_| ScoreParseError::OutOfRange),
        // Digit runs that overflow i64 are still integers, just huge.
        Err(_) => match trimmed.strip_prefix('-') {
            Some(digits) if is_digits(digits) => Err(ScoreParseError::Negative),
            None if is_digits(trimmed.strip_prefix('+').unwrap_or(trimmed)) => {
                Err(ScoreParseError::OutOfRange)
            }
            _ => Err(ScoreParseError::NotANumber),
        },
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Save gate
// ---------------------------------------------------------------------------

/// A required cell that is empty, blocking a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingField {
    pub row: usize,
    pub field: Field,
}

impl MissingField {
    #[must_use]
    pub const fn new(row: usize, field: Field) -> Self {
        Self { row, field }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} is missing {}", self.row, self.field)
    }
}

impl std::error::Error for MissingField {}

/// Every `(row, field)` whose name or description is empty after trimming.
///
/// Ordered by row, then name before description. An empty result means
/// the rubric may be saved.
#[must_use]
pub fn validate_for_save(criteria: &[Criterion]) -> Vec<MissingField> {
    criteria
        .iter()
        .enumerate()
        .flat_map(|(row, criterion)| {
            [Field::Name, Field::Description]
                .into_iter()
                .filter(move |&field| {
                    criterion
                        .text(field)
                        .is_none_or(|text| text.trim().is_empty())
                })
                .map(move |field| MissingField::new(row, field))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(min: Score, max: Score, pass: Score) -> Criterion {
        Criterion::new("n", "d").with_scores(min, max, pass)
    }

    #[test]
    fn min_must_stay_below_max() {
        let c = scored(1, 5, 3);
        assert_eq!(validate_edit(Field::MinScore, 10, &c), Err(EditViolation::MinNotBelowMax));
        assert_eq!(validate_edit(Field::MinScore, 5, &c), Err(EditViolation::MinNotBelowMax));
        assert_eq!(validate_edit(Field::MinScore, 0, &c), Ok(()));
        assert_eq!(validate_edit(Field::MinScore, 3, &c), Ok(()));
    }

    #[test]
    fn raising_min_above_pass_is_rejected() {
        let c = scored(1, 5, 3);
        assert_eq!(validate_edit(Field::MinScore, 4, &c), Err(EditViolation::PassOutOfRange));
    }

    #[test]
    fn max_must_stay_above_min() {
        let c = scored(1, 5, 3);
        assert_eq!(validate_edit(Field::MaxScore, 1, &c), Err(EditViolation::MaxNotAboveMin));
        assert_eq!(validate_edit(Field::MaxScore, 0, &c), Err(EditViolation::MaxNotAboveMin));
        assert_eq!(validate_edit(Field::MaxScore, 2, &c), Err(EditViolation::PassOutOfRange));
        assert_eq!(validate_edit(Field::MaxScore, 3, &c), Ok(()));
        assert_eq!(validate_edit(Field::MaxScore, 100, &c), Ok(()));
    }

    #[test]
    fn pass_must_sit_inside_range() {
        let c = scored(1, 5, 3);
        assert_eq!(validate_edit(Field::PassScore, 10, &c), Err(EditViolation::PassOutOfRange));
        assert_eq!(validate_edit(Field::PassScore, 0, &c), Err(EditViolation::PassOutOfRange));
        assert_eq!(validate_edit(Field::PassScore, 1, &c), Ok(()));
        assert_eq!(validate_edit(Field::PassScore, 5, &c), Ok(()));
    }

    #[test]
    fn text_fields_always_pass() {
        let c = scored(1, 5, 3);
        assert_eq!(validate_edit(Field::Name, 0, &c), Ok(()));
        assert_eq!(validate_edit(Field::Description, 99, &c), Ok(()));
    }

    #[test]
    fn violation_messages_are_literal() {
        assert_eq!(
            EditViolation::MinNotBelowMax.to_string(),
            "Minimum score must be less than the maximum score"
        );
        assert_eq!(
            EditViolation::MaxNotAboveMin.to_string(),
            "Maximum score must be greater than the minimum score"
        );
        assert_eq!(
            EditViolation::PassOutOfRange.to_string(),
            "Pass mark must be between the minimum and maximum"
        );
    }

    #[test]
    fn parse_score_accepts_non_negative_integers() {
        assert_eq!(parse_score("10"), Ok(10));
        assert_eq!(parse_score("  7 "), Ok(7));
        assert_eq!(parse_score("0"), Ok(0));
        assert_eq!(parse_score("+4"), Ok(4));
    }

    #[test]
    fn parse_score_rejections() {
        assert_eq!(parse_score(""), Err(ScoreParseError::Empty));
        assert_eq!(parse_score("   "), Err(ScoreParseError::Empty));
        assert_eq!(parse_score("abc"), Err(ScoreParseError::NotANumber));
        assert_eq!(parse_score("1.5"), Err(ScoreParseError::NotANumber));
        assert_eq!(parse_score("+"), Err(ScoreParseError::NotANumber));
        assert_eq!(parse_score("-"), Err(ScoreParseError::NotANumber));
        assert_eq!(parse_score("-1"), Err(ScoreParseError::Negative));
        assert_eq!(parse_score("-99999999999999999999"), Err(ScoreParseError::Negative));
        assert_eq!(parse_score("4294967296"), Err(ScoreParseError::OutOfRange));
        assert_eq!(parse_score("99999999999999999999"), Err(ScoreParseError::OutOfRange));
    }

    #[test]
    fn save_gate_reports_single_missing_name() {
        let criteria = vec![Criterion::new("", "x")];
        assert_eq!(validate_for_save(&criteria), vec![MissingField::new(0, Field::Name)]);
    }

    #[test]
    fn save_gate_reports_every_offender_in_order() {
        let criteria = vec![
            Criterion::new("ok", "ok"),
            Criterion::new("  ", ""),
            Criterion::new("n", " \n"),
        ];
        assert_eq!(
            validate_for_save(&criteria),
            vec![
                MissingField::new(1, Field::Name),
                MissingField::new(1, Field::Description),
                MissingField::new(2, Field::Description),
            ]
        );
    }

    #[test]
    fn save_gate_passes_complete_rubric() {
        let criteria = vec![Criterion::new("a", "b"), Criterion::new("c", "d")];
        assert!(validate_for_save(&criteria).is_empty());
        assert!(validate_for_save(&[]).is_empty());
    }

    #[test]
    fn missing_field_display() {
        assert_eq!(MissingField::new(2, Field::Description).to_string(), "row 2 is missing description");
    }
}
