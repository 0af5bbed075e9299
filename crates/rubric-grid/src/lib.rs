#![forbid(unsafe_code)]

//! Editable-grid engine for scoring rubrics.
//!
//! A rubric is a named, ordered list of criteria, each with a name, a
//! description, and a `[min, max]` score range containing a pass mark.
//! [`GridController`] lets a user edit those cells one at a time, enforces
//! the score invariants on every commit, gates saves on required text, and
//! reports whether the rubric differs from its last persisted state.
//!
//! Rendering, persistence, and routing belong to the host; the grid talks to
//! it only through [`GridEvent`]s.

pub mod cell_edit;
pub mod config;
pub mod criterion;
pub mod deadline;
pub mod dirty;
pub mod events;
pub mod grid;
pub mod highlight;
pub mod notification;
pub mod validation;

pub use cell_edit::{CellEditor, CommitOutcome, EditSession, KeyOutcome};
pub use config::GridConfig;
pub use criterion::{
    Criterion, CriterionDefaults, Field, Rubric, RubricId, RubricSnapshot, Score,
};
pub use deadline::Deadline;
pub use dirty::{DirtyTracker, compute_dirty};
pub use events::{EventSink, GridEvent};
pub use grid::{GridController, SaveOutcome};
pub use highlight::{HighlightRequest, HighlightSignal, Subscription};
pub use notification::{Notification, NotificationIcon, NotificationId, NotificationSlot};
pub use validation::{
    EditViolation, MissingField, ScoreParseError, parse_score, validate_edit, validate_for_save,
};
