#![forbid(unsafe_code)]

//! Outbound events the host must handle.
//!
//! The grid never talks to storage, routing, or a renderer. It reports what
//! happened through an [`EventSink`] and returns immediately; whatever the
//! host does with the event (an HTTP call, a dialog) is not awaited.

use crate::criterion::Criterion;
use crate::notification::Notification;

/// Something the host should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// The criteria list changed (cell commit, add, delete, revert).
    CriteriaChanged(Vec<Criterion>),
    /// The rubric name changed (rename, revert).
    NameChanged(String),
    /// The rubric passed the save gate; the host should persist it.
    SaveRequested,
    /// The user asked for a copy of the rubric.
    DuplicateRequested,
    /// The user asked to delete the whole rubric.
    DeleteRequested,
    /// The user reverted to the baseline.
    RevertRequested,
    /// Show a notification for `notification.duration`.
    Notify(Notification),
}

impl GridEvent {
    /// Short, stable name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CriteriaChanged(_) => "criteria_changed",
            Self::NameChanged(_) => "name_changed",
            Self::SaveRequested => "save_requested",
            Self::DuplicateRequested => "duplicate_requested",
            Self::DeleteRequested => "delete_requested",
            Self::RevertRequested => "revert_requested",
            Self::Notify(_) => "notify",
        }
    }
}

/// Receiver for [`GridEvent`]s.
///
/// Implemented for `Vec<GridEvent>` (collect everything, handy in tests) and
/// for any `FnMut(GridEvent)` closure.
pub trait EventSink {
    fn emit(&mut self, event: GridEvent);
}

impl EventSink for Vec<GridEvent> {
    fn emit(&mut self, event: GridEvent) {
        self.push(event);
    }
}

impl<F: FnMut(GridEvent)> EventSink for F {
    fn emit(&mut self, event: GridEvent) {
        self(event);
    }
}
