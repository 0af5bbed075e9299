#![forbid(unsafe_code)]

//! Dirty-state comparison driving the save/cancel affordances.
//!
//! Two regimes:
//!
//! - **Draft** (no baseline): dirty as soon as the user has put anything
//!   deliberate into the rubric. A name, any criterion text, or a min/max that
//!   differs from the defaults. An untouched default draft is clean.
//! - **Published** (baseline present): dirty when the name, the criteria
//!   count, or any field of any positional criterion differs from the
//!   baseline.
//!
//! [`DirtyTracker`] adds transition suppression on top: the first comparison
//! after the rubric identity changes reports clean, because the host may not
//! have swapped in the matching baseline yet.

use crate::criterion::{Criterion, CriterionDefaults, RubricId, RubricSnapshot};

/// Compare `{name, criteria}` against `baseline`, without identity tracking.
#[must_use]
pub fn compute_dirty(
    name: &str,
    criteria: &[Criterion],
    baseline: Option<&RubricSnapshot>,
    defaults: &CriterionDefaults,
) -> bool {
    match baseline {
        None => draft_has_content(name, criteria, defaults),
        Some(baseline) => differs_from_baseline(name, criteria, baseline),
    }
}

fn draft_has_content(name: &str, criteria: &[Criterion], defaults: &CriterionDefaults) -> bool {
    !name.trim().is_empty()
        || criteria.iter().any(|c| {
            !c.name.is_empty()
                || !c.description.is_empty()
                || c.min_score != defaults.min_score
                || c.max_score != defaults.max_score
        })
}

fn differs_from_baseline(name: &str, criteria: &[Criterion], baseline: &RubricSnapshot) -> bool {
    name != baseline.name
        || criteria.len() != baseline.criteria.len()
        || criteria
            .iter()
            .enumerate()
            .any(|(i, c)| baseline.criteria.get(i) != Some(c))
}

/// Stateful comparator remembering which rubric it compared last.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    previous_id: Option<RubricId>,
    defaults: CriterionDefaults,
}

impl DirtyTracker {
    /// Start tracking the rubric identified by `id` (`None` for an unsaved
    /// draft).
    #[must_use]
    pub fn new(id: Option<RubricId>, defaults: CriterionDefaults) -> Self {
        Self {
            previous_id: id,
            defaults,
        }
    }

    /// Identity seen on the last comparison.
    #[must_use]
    pub fn previous_id(&self) -> Option<&RubricId> {
        self.previous_id.as_ref()
    }

    /// Compare, forcing `false` when `id` differs from the previous call's.
    pub fn compute(
        &mut self,
        id: Option<&RubricId>,
        name: &str,
        criteria: &[Criterion],
        baseline: Option<&RubricSnapshot>,
    ) -> bool {
        if self.previous_id.as_ref() != id {
            self.previous_id = id.cloned();
            return false;
        }
        compute_dirty(name, criteria, baseline, &self.defaults)
    }
}
