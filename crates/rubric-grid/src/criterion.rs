#![forbid(unsafe_code)]

//! Criterion model: the rows of a rubric and their invariants.
//!
//! A [`Criterion`] is plain data. Its two predicates are deliberately
//! side-effect free; the grid decides what to do when they fail.
//!
//! # Invariants
//!
//! 1. `min_score < max_score`
//! 2. `min_score <= pass_score <= max_score`
//! 3. Scores are non-negative integers (enforced by [`Score`] being unsigned)
//! 4. For a save, `name` and `description` are non-empty after trimming
//!
//! Invariants 1 and 2 are enforced at cell-commit time, invariant 4 at save
//! time. Nothing is checked on keystrokes.

use std::fmt;

/// Numeric score type. Unsigned, so negative scores are unrepresentable.
pub type Score = u32;

/// Default minimum score for a freshly added criterion.
pub const DEFAULT_MIN_SCORE: Score = 1;
/// Default maximum score for a freshly added criterion.
pub const DEFAULT_MAX_SCORE: Score = 5;
/// Default pass mark for a freshly added criterion.
pub const DEFAULT_PASS_SCORE: Score = 3;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// An editable column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Field {
    /// Criterion name.
    Name,
    /// Free-form, multi-line description.
    Description,
    /// Lowest attainable score.
    MinScore,
    /// Highest attainable score.
    MaxScore,
    /// Score at or above which the criterion passes.
    PassScore,
}

impl Field {
    /// All fields in display (column) order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Description,
        Self::MinScore,
        Self::MaxScore,
        Self::PassScore,
    ];

    /// Whether the field holds a score.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::MinScore | Self::MaxScore | Self::PassScore)
    }

    /// Whether Enter inserts a line break instead of committing.
    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, Self::Description)
    }

    /// Stable identifier, matching the host-side column keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::MinScore => "minScore",
            Self::MaxScore => "maxScore",
            Self::PassScore => "passScore",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CriterionDefaults
// ---------------------------------------------------------------------------

/// Scores given to a newly added criterion.
///
/// Also the reference point for "untouched" when deciding whether a draft
/// rubric has unsaved content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionDefaults {
    pub min_score: Score,
    pub max_score: Score,
    pub pass_score: Score,
}

impl Default for CriterionDefaults {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            pass_score: DEFAULT_PASS_SCORE,
        }
    }
}

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// One evaluation criterion (a grid row).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Criterion {
    pub name: String,
    pub description: String,
    pub min_score: Score,
    pub max_score: Score,
    pub pass_score: Score,
}

impl Default for Criterion {
    fn default() -> Self {
        Self::from_defaults(&CriterionDefaults::default())
    }
}

impl Criterion {
    /// Create a criterion with the given text and default scores.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Create an empty criterion using the given default scores.
    #[must_use]
    pub fn from_defaults(defaults: &CriterionDefaults) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            min_score: defaults.min_score,
            max_score: defaults.max_score,
            pass_score: defaults.pass_score,
        }
    }

    /// Set all three scores (builder).
    #[must_use]
    pub fn with_scores(mut self, min: Score, max: Score, pass: Score) -> Self {
        self.min_score = min;
        self.max_score = max;
        self.pass_score = pass;
        self
    }

    /// `name` and `description` are both non-empty after trimming.
    #[must_use]
    pub fn is_committable(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// The score invariants hold: `min < max` and `min <= pass <= max`.
    #[must_use]
    pub fn is_numerically_valid(&self) -> bool {
        self.min_score < self.max_score
            && self.min_score <= self.pass_score
            && self.pass_score <= self.max_score
    }

    /// Text content of a textual field, `None` for score fields.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Description => Some(&self.description),
            _ => None,
        }
    }

    /// Value of a score field, `None` for textual fields.
    #[must_use]
    pub fn score(&self, field: Field) -> Option<Score> {
        match field {
            Field::MinScore => Some(self.min_score),
            Field::MaxScore => Some(self.max_score),
            Field::PassScore => Some(self.pass_score),
            Field::Name | Field::Description => None,
        }
    }

    /// Committed value of any field as editable text.
    #[must_use]
    pub fn display_value(&self, field: Field) -> String {
        match self.score(field) {
            Some(score) => score.to_string(),
            None => self.text(field).unwrap_or_default().to_owned(),
        }
    }

    /// Overwrite a textual field. Returns `false` for score fields.
    pub(crate) fn set_text(&mut self, field: Field, value: String) -> bool {
        match field {
            Field::Name => self.name = value,
            Field::Description => self.description = value,
            _ => return false,
        }
        true
    }

    /// Overwrite a score field. Returns `false` for textual fields.
    pub(crate) fn set_score(&mut self, field: Field, value: Score) -> bool {
        match field {
            Field::MinScore => self.min_score = value,
            Field::MaxScore => self.max_score = value,
            Field::PassScore => self.pass_score = value,
            Field::Name | Field::Description => return false,
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Rubric
// ---------------------------------------------------------------------------

/// Opaque identity of the rubric being edited.
///
/// Only compared for equality; a change of identity is what triggers the
/// dirty-state transition suppression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RubricId(String);

impl RubricId {
    /// Create a new rubric ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RubricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered set of criteria.
///
/// Criterion order is display order and is stable under edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rubric {
    pub name: String,
    pub criteria: Vec<Criterion>,
}

/// Last persisted `{ name, criteria }`, supplied by the host.
pub type RubricSnapshot = Rubric;

impl Rubric {
    /// Create a rubric with the given name and criteria.
    #[must_use]
    pub fn new(name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            name: name.into(),
            criteria,
        }
    }

    /// A fresh, unnamed rubric with one default criterion.
    #[must_use]
    pub fn draft(defaults: &CriterionDefaults) -> Self {
        Self {
            name: String::new(),
            criteria: vec![Criterion::from_defaults(defaults)],
        }
    }

    /// Every criterion satisfies the score invariants.
    #[must_use]
    pub fn is_numerically_valid(&self) -> bool {
        self.criteria.iter().all(Criterion::is_numerically_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criterion_uses_system_defaults() {
        let c = Criterion::default();
        assert_eq!(c.name, "");
        assert_eq!(c.description, "");
        assert_eq!((c.min_score, c.max_score, c.pass_score), (1, 5, 3));
        assert!(c.is_numerically_valid());
        assert!(!c.is_committable());
    }

    #[test]
    fn committable_requires_both_texts_after_trim() {
        assert!(Criterion::new("Clarity", "Is it clear?").is_committable());
        assert!(!Criterion::new("Clarity", "   ").is_committable());
        assert!(!Criterion::new("\t\n", "desc").is_committable());
        assert!(!Criterion::new("", "").is_committable());
    }

    #[test]
    fn numeric_validity_checks_all_three_bounds() {
        let base = Criterion::default();
        assert!(base.clone().with_scores(0, 1, 0).is_numerically_valid());
        assert!(base.clone().with_scores(0, 1, 1).is_numerically_valid());
        assert!(!base.clone().with_scores(3, 3, 3).is_numerically_valid());
        assert!(!base.clone().with_scores(5, 1, 3).is_numerically_valid());
        assert!(!base.clone().with_scores(1, 5, 6).is_numerically_valid());
        assert!(!base.with_scores(2, 5, 1).is_numerically_valid());
    }

    #[test]
    fn field_accessors_split_text_and_scores() {
        let c = Criterion::new("n", "d").with_scores(0, 10, 4);
        assert_eq!(c.text(Field::Name), Some("n"));
        assert_eq!(c.text(Field::MinScore), None);
        assert_eq!(c.score(Field::MaxScore), Some(10));
        assert_eq!(c.score(Field::Description), None);
        assert_eq!(c.display_value(Field::PassScore), "4");
        assert_eq!(c.display_value(Field::Description), "d");
    }

    #[test]
    fn setters_reject_wrong_field_kind() {
        let mut c = Criterion::default();
        assert!(!c.set_text(Field::MinScore, "x".into()));
        assert!(!c.set_score(Field::Name, 9));
        assert!(c.set_score(Field::PassScore, 4));
        assert!(c.set_text(Field::Description, "why".into()));
        assert_eq!(c.pass_score, 4);
        assert_eq!(c.description, "why");
    }

    #[test]
    fn field_kinds() {
        let numeric: Vec<_> = Field::ALL.iter().filter(|f| f.is_numeric()).collect();
        assert_eq!(numeric.len(), 3);
        assert!(Field::Description.is_multiline());
        assert!(!Field::Name.is_multiline());
        assert_eq!(Field::MinScore.to_string(), "minScore");
    }

    #[test]
    fn draft_rubric_has_one_default_row() {
        let rubric = Rubric::draft(&CriterionDefaults::default());
        assert_eq!(rubric.name, "");
        assert_eq!(rubric.criteria, vec![Criterion::default()]);
        assert!(rubric.is_numerically_valid());
    }

    #[test]
    fn rubric_id_compares_by_value() {
        assert_eq!(RubricId::new("a"), RubricId::new("a"));
        assert_ne!(RubricId::new("a"), RubricId::new("b"));
        assert_eq!(RubricId::new("abc").to_string(), "abc");
    }
}
