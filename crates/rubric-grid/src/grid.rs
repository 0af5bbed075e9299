#![forbid(unsafe_code)]

//! Grid controller: the public face of the rubric editor.
//!
//! Composes the cell editor, validation, dirty tracking, the highlight
//! signal, and the notification slot behind the operations a hosting UI
//! calls. Every operation runs to completion synchronously; outbound
//! [`GridEvent`]s are fired and forgotten.
//!
//! # Example
//!
//! ```rust
//! use rubric_grid::{Field, GridConfig, GridController, GridEvent, Rubric, SaveOutcome};
//!
//! let mut grid = GridController::new(Rubric::draft(&Default::default()), GridConfig::default())
//!     .with_events(Vec::<GridEvent>::new());
//! assert!(!grid.is_dirty());
//!
//! grid.rename_rubric("Essay");
//! assert!(grid.is_dirty());
//!
//! // The default criterion has no name yet, so the save gate blocks.
//! assert!(matches!(grid.save(), SaveOutcome::Blocked(_)));
//! assert_eq!(grid.highlight().map(|h| h.field), Some(Field::Name));
//! ```
//!
//! # Invariants
//!
//! 1. At most one edit session, one highlight, one notification.
//! 2. After any operation, every criterion that went through a score commit
//!    satisfies `min < max` and `min <= pass <= max`.
//! 3. The baseline is never mutated; `revert` copies from it.
//! 4. `SaveRequested` is only emitted when the save gate passes.
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Score invariant violated | Edit dropped, "Incorrect Value" notification |
//! | Unparseable score | Edit dropped silently |
//! | Empty name/description on save | Save blocked, first cell highlighted, one notification |
//! | No event sink attached | `add_criterion` / `delete_criterion` are no-ops |
//! | No baseline | `revert` is a no-op |
//! | Read-only | `begin_edit` / `rename_rubric` are no-ops |
//!
//! The controller is single-threaded (`!Send`): hosts with several threads
//! must marshal calls onto the one thread that owns it.

use std::fmt;
use std::time::Duration;

use rubric_core::event::Event;
use rubric_core::{debug, debug_span, trace};

use crate::cell_edit::{CellEditor, CommitOutcome, EditSession, KeyOutcome};
use crate::config::GridConfig;
use crate::criterion::{Criterion, Field, Rubric, RubricId, RubricSnapshot};
use crate::dirty::DirtyTracker;
use crate::events::{EventSink, GridEvent};
use crate::highlight::{HighlightRequest, HighlightSignal};
use crate::notification::{Notification, NotificationIcon, NotificationSlot};
use crate::validation::{
    BODY_MISSING_FIELDS, MissingField, TITLE_INCORRECT_VALUE, TITLE_MISSING_FIELDS,
    validate_for_save,
};

/// Result of [`GridController::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The save gate passed and `SaveRequested` was emitted.
    Requested,
    /// Required cells are empty; nothing was emitted.
    Blocked(Vec<MissingField>),
}

impl SaveOutcome {
    #[must_use]
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::Requested)
    }
}

/// Editable-grid state machine for one rubric.
pub struct GridController {
    id: Option<RubricId>,
    rubric: Rubric,
    baseline: Option<RubricSnapshot>,
    config: GridConfig,
    editor: CellEditor,
    tracker: DirtyTracker,
    dirty: bool,
    highlight: HighlightSignal,
    notification: NotificationSlot,
    sink: Option<Box<dyn EventSink>>,
}

impl fmt::Debug for GridController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("id", &self.id)
            .field("rubric", &self.rubric)
            .field("baseline", &self.baseline)
            .field("config", &self.config)
            .field("editor", &self.editor)
            .field("dirty", &self.dirty)
            .field("highlight", &self.highlight)
            .field("notification", &self.notification)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl GridController {
    /// Create a controller for an unsaved rubric with no baseline and no
    /// event sink.
    pub fn new(rubric: Rubric, config: GridConfig) -> Self {
        let mut grid = Self {
            id: None,
            rubric,
            baseline: None,
            tracker: DirtyTracker::new(None, config.defaults),
            highlight: HighlightSignal::new(config.highlight_window),
            config,
            editor: CellEditor::new(),
            dirty: false,
            notification: NotificationSlot::new(),
            sink: None,
        };
        grid.refresh_dirty();
        grid
    }

    /// Set the identity of the rubric being edited (builder).
    #[must_use]
    pub fn with_id(mut self, id: RubricId) -> Self {
        self.id = Some(id);
        self.tracker = DirtyTracker::new(self.id.clone(), self.config.defaults);
        self.refresh_dirty();
        self
    }

    /// Set the last persisted state (builder).
    #[must_use]
    pub fn with_baseline(mut self, baseline: RubricSnapshot) -> Self {
        self.baseline = Some(baseline);
        self.refresh_dirty();
        self
    }

    /// Attach the sink that receives outbound events (builder).
    #[must_use]
    pub fn with_events(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Attach or replace the event sink.
    pub fn set_events(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Detach the event sink, making the grid a read-only embedding for
    /// structural changes.
    pub fn detach_events(&mut self) -> Option<Box<dyn EventSink>> {
        self.sink.take()
    }

    // --- Accessors ---

    #[must_use]
    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.rubric.criteria
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.rubric.name
    }

    #[must_use]
    pub fn id(&self) -> Option<&RubricId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn baseline(&self) -> Option<&RubricSnapshot> {
        self.baseline.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Whether the save/cancel affordances should be shown.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn has_events(&self) -> bool {
        self.sink.is_some()
    }

    #[must_use]
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.editor.session()
    }

    #[must_use]
    pub fn is_editing_cell(&self, row: usize, field: Field) -> bool {
        self.editor.is_editing_cell(row, field)
    }

    /// Whether the UI may offer deleting `row`.
    ///
    /// The last remaining criterion is never deletable from the UI; this is
    /// a presentation rule, [`delete_criterion`](Self::delete_criterion)
    /// itself does not enforce it.
    #[must_use]
    pub fn can_delete_row(&self, row: usize) -> bool {
        self.sink.is_some() && self.rubric.criteria.len() >= 2 && row < self.rubric.criteria.len()
    }

    /// The active highlight, if any.
    #[must_use]
    pub fn highlight(&self) -> Option<HighlightRequest> {
        self.highlight.current()
    }

    #[must_use]
    pub fn is_row_highlighted(&self, row: usize) -> bool {
        self.highlight.is_row_highlighted(row)
    }

    /// A handle for components that need to point the grid at a cell.
    #[must_use]
    pub fn highlight_handle(&self) -> HighlightSignal {
        self.highlight.clone()
    }

    /// The visible notification, if any.
    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.current()
    }

    // --- Cell editing ---

    /// Start editing `(row, field)`, discarding any uncommitted session.
    ///
    /// Returns `false` (and changes nothing) in read-only mode or when `row`
    /// does not exist.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn begin_edit(&mut self, row: usize, field: Field) -> bool {
        if self.config.read_only {
            trace!(row, field = %field, "begin_edit ignored: read-only");
            return false;
        }
        let Some(criterion) = self.rubric.criteria.get(row) else {
            trace!(row, "begin_edit ignored: no such row");
            return false;
        };
        if let Some(discarded) = self.editor.begin(row, field, criterion) {
            debug!(row = discarded.row(), field = %discarded.field(), "uncommitted edit discarded");
        }
        debug!(row, field = %field, "edit started");
        true
    }

    /// Replace the transient text of the active session.
    pub fn update_transient(&mut self, value: impl Into<String>) -> bool {
        self.editor.update_transient(value)
    }

    /// Commit the active session.
    ///
    /// Score edits that break an invariant raise an "Incorrect Value"
    /// notification; unparseable score text is dropped without one.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn commit(&mut self) -> CommitOutcome {
        let outcome = self.editor.commit(&mut self.rubric.criteria);
        match &outcome {
            CommitOutcome::Applied { row, field } => {
                debug!(row, field = %field, "cell committed");
                self.emit_criteria_changed();
                self.refresh_dirty();
            }
            CommitOutcome::Rejected {
                row,
                field,
                violation,
            } => {
                debug!(row, field = %field, violation = %violation, "cell edit rejected");
                self.notify(TITLE_INCORRECT_VALUE, violation.message(), NotificationIcon::Error);
            }
            CommitOutcome::Discarded { row, field, reason } => {
                debug!(row, field = %field, reason = %reason, "cell edit discarded");
            }
            CommitOutcome::Unchanged { .. } | CommitOutcome::StaleRow { .. } | CommitOutcome::NoSession => {}
        }
        outcome
    }

    /// Drop the active session without touching the model.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn cancel_edit(&mut self) -> bool {
        let cancelled = self.editor.cancel();
        if let Some(session) = &cancelled {
            debug!(row = session.row(), field = %session.field(), "edit cancelled");
        }
        cancelled.is_some()
    }

    /// Route an input event to the active session.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => match self.editor.handle_key(key) {
                KeyOutcome::Commit => {
                    self.commit();
                    true
                }
                KeyOutcome::Cancel => self.cancel_edit(),
                KeyOutcome::Edited => true,
                KeyOutcome::Ignored => false,
            },
            Event::Paste(paste) => self.editor.paste(&paste.text),
            Event::Focus(false) if self.editor.is_editing() => {
                self.commit();
                true
            }
            Event::Focus(_) => false,
        }
    }

    // --- Structural operations ---

    /// Append a criterion with the configured default scores.
    ///
    /// No-op without an event sink.
    pub fn add_criterion(&mut self) -> bool {
        if self.sink.is_none() {
            trace!("add_criterion ignored: no event sink");
            return false;
        }
        self.editor.cancel();
        self.rubric
            .criteria
            .push(Criterion::from_defaults(&self.config.defaults));
        debug!(rows = self.rubric.criteria.len(), "criterion added");
        self.emit_criteria_changed();
        self.refresh_dirty();
        true
    }

    /// Remove the criterion at `index`.
    ///
    /// No-op without an event sink or for an index past the end. A highlight
    /// on the removed row or any row after it is cleared, since those indices
    /// now name different criteria.
    pub fn delete_criterion(&mut self, index: usize) -> bool {
        if self.sink.is_none() {
            trace!(index, "delete_criterion ignored: no event sink");
            return false;
        }
        if index >= self.rubric.criteria.len() {
            trace!(index, "delete_criterion ignored: no such row");
            return false;
        }
        self.editor.cancel();
        self.rubric.criteria.remove(index);
        if self.highlight.current().is_some_and(|h| h.row >= index) {
            self.highlight.clear();
        }
        debug!(index, rows = self.rubric.criteria.len(), "criterion deleted");
        self.emit_criteria_changed();
        self.refresh_dirty();
        true
    }

    /// Commit a new rubric name.
    pub fn rename_rubric(&mut self, name: impl Into<String>) -> bool {
        if self.config.read_only {
            trace!("rename ignored: read-only");
            return false;
        }
        let name = name.into();
        if name == self.rubric.name {
            return false;
        }
        self.rubric.name = name;
        debug!(name = %self.rubric.name, "rubric renamed");
        self.emit(GridEvent::NameChanged(self.rubric.name.clone()));
        self.refresh_dirty();
        true
    }

    // --- Rubric-level actions ---

    /// Run the save gate and, if it passes, ask the host to persist.
    ///
    /// An active edit session is committed first. When required cells are
    /// empty, only the first one is highlighted and a single notification is
    /// shown.
    pub fn save(&mut self) -> SaveOutcome {
        let span = debug_span!("rubric.save", rows = self.rubric.criteria.len());
        let _guard = span.enter();

        if self.editor.is_editing() {
            self.commit();
        }
        let missing = validate_for_save(&self.rubric.criteria);
        if let Some(first) = missing.first() {
            debug!(
                blockers = missing.len(),
                row = first.row,
                field = %first.field,
                "save blocked"
            );
            self.highlight.request(first.row, first.field);
            self.notify(TITLE_MISSING_FIELDS, BODY_MISSING_FIELDS, NotificationIcon::Warning);
            return SaveOutcome::Blocked(missing);
        }
        debug!("save requested");
        self.emit(GridEvent::SaveRequested);
        SaveOutcome::Requested
    }

    /// Restore name and criteria from the baseline (the cancel button).
    ///
    /// No-op without a baseline.
    pub fn revert(&mut self) -> bool {
        let Some(baseline) = self.baseline.as_ref() else {
            trace!("revert ignored: no baseline");
            return false;
        };
        self.rubric = baseline.clone();
        self.editor.cancel();
        debug!(rows = self.rubric.criteria.len(), "reverted to baseline");
        self.emit(GridEvent::NameChanged(self.rubric.name.clone()));
        self.emit_criteria_changed();
        self.emit(GridEvent::RevertRequested);
        self.refresh_dirty();
        true
    }

    /// Ask the host to duplicate the rubric.
    pub fn duplicate(&mut self) {
        debug!("duplicate requested");
        self.emit(GridEvent::DuplicateRequested);
    }

    /// Ask the host to delete the whole rubric.
    pub fn delete_rubric(&mut self) {
        debug!("delete requested");
        self.emit(GridEvent::DeleteRequested);
    }

    // --- Host integration ---

    /// Swap in another rubric (or the same rubric under a new identity).
    ///
    /// The first dirty computation after an identity change reports clean.
    pub fn load(&mut self, id: Option<RubricId>, rubric: Rubric, baseline: Option<RubricSnapshot>) {
        debug!(id = ?id, rows = rubric.criteria.len(), "rubric loaded");
        self.editor.cancel();
        self.highlight.clear();
        self.id = id;
        self.rubric = rubric;
        self.baseline = baseline;
        self.refresh_dirty();
    }

    /// Replace the baseline, typically with the result of a successful save.
    pub fn set_baseline(&mut self, baseline: Option<RubricSnapshot>) {
        debug!(present = baseline.is_some(), "baseline replaced");
        self.baseline = baseline;
        self.refresh_dirty();
    }

    /// Point the grid at `(row, field)` for the configured window.
    pub fn request_highlight(&mut self, row: usize, field: Field) {
        debug!(row, field = %field, "highlight requested");
        self.highlight.request(row, field);
    }

    /// Close the visible notification now.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn dismiss_notification(&mut self) -> bool {
        let dismissed = self.notification.dismiss();
        if let Some(notification) = &dismissed {
            debug!(title = %notification.title, "notification dismissed");
        }
        dismissed.is_some()
    }

    /// Advance the highlight and notification timers by `delta`.
    ///
    /// Returns `true` if either expired on this tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let highlight_expired = self.highlight.tick(delta);
        let notification_expired = self.notification.tick(delta);
        highlight_expired || notification_expired
    }

    // --- Internals ---

    fn refresh_dirty(&mut self) {
        self.dirty = self.tracker.compute(
            self.id.as_ref(),
            &self.rubric.name,
            &self.rubric.criteria,
            self.baseline.as_ref(),
        );
    }

    fn notify(&mut self, title: &str, body: &str, icon: NotificationIcon) {
        let notification = Notification::new(title, body)
            .icon(icon)
            .duration(self.config.notification_duration);
        debug!(icon = icon.as_str(), title, "notification shown");
        self.notification.show(notification.clone());
        self.emit(GridEvent::Notify(notification));
    }

    fn emit_criteria_changed(&mut self) {
        self.emit(GridEvent::CriteriaChanged(self.rubric.criteria.clone()));
    }

    fn emit(&mut self, event: GridEvent) {
        if let Some(sink) = self.sink.as_mut() {
            trace!(kind = event.kind(), "event emitted");
            sink.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use rubric_core::event::{KeyCode, KeyEvent, Modifiers, PasteEvent};

    type Log = Rc<RefCell<Vec<GridEvent>>>;

    fn recording(grid: GridController) -> (GridController, Log) {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        (grid.with_events(move |e: GridEvent| sink.borrow_mut().push(e)), log)
    }

    fn sample() -> Rubric {
        Rubric::new(
            "Essay",
            vec![
                Criterion::new("Clarity", "Clear prose"),
                Criterion::new("Depth", "Covers the topic"),
            ],
        )
    }

    fn published() -> (GridController, Log) {
        recording(
            GridController::new(sample(), GridConfig::default())
                .with_id(RubricId::new("r1"))
                .with_baseline(sample()),
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn published_rubric_starts_clean() {
        let (grid, log) = published();
        assert!(!grid.is_dirty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn begin_edit_read_only_is_noop() {
        let mut grid = GridController::new(sample(), GridConfig::default().read_only(true));
        assert!(!grid.begin_edit(0, Field::Name));
        assert!(grid.edit_session().is_none());
        assert!(!grid.rename_rubric("Other"));
        assert_eq!(grid.name(), "Essay");
    }

    #[test]
    fn begin_edit_out_of_range_is_noop() {
        let (mut grid, _) = published();
        assert!(!grid.begin_edit(7, Field::Name));
        assert!(grid.edit_session().is_none());
    }

    #[test]
    fn committed_text_emits_and_marks_dirty() {
        let (mut grid, log) = published();
        grid.begin_edit(1, Field::Name);
        grid.update_transient("Breadth");
        assert!(grid.commit().is_applied());
        assert_eq!(grid.criteria()[1].name, "Breadth");
        assert!(grid.is_dirty());
        assert!(matches!(log.borrow().last(), Some(GridEvent::CriteriaChanged(c)) if c[1].name == "Breadth"));
    }

    #[test]
    fn rejected_score_notifies_and_keeps_model() {
        let (mut grid, log) = published();
        grid.begin_edit(0, Field::PassScore);
        grid.update_transient("9");
        assert!(matches!(grid.commit(), CommitOutcome::Rejected { .. }));
        assert_eq!(grid.criteria(), sample().criteria.as_slice());
        let shown = grid.notification().unwrap();
        assert_eq!(shown.title, "Incorrect Value");
        assert_eq!(shown.icon, NotificationIcon::Error);
        assert!(matches!(log.borrow().as_slice(), [GridEvent::Notify(n)] if n.duration_ms() == 5000));
        assert!(!grid.is_dirty());
    }

    #[test]
    fn garbage_score_is_silent() {
        let (mut grid, log) = published();
        grid.begin_edit(0, Field::MinScore);
        grid.update_transient("ten");
        assert!(matches!(grid.commit(), CommitOutcome::Discarded { .. }));
        assert!(grid.notification().is_none());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn keyboard_flow_commits_and_cancels() {
        let (mut grid, _) = published();
        grid.begin_edit(0, Field::MaxScore);
        assert!(grid.handle_event(&key(KeyCode::Backspace)));
        assert!(grid.handle_event(&key(KeyCode::Char('8'))));
        assert!(grid.handle_event(&key(KeyCode::Enter)));
        assert_eq!(grid.criteria()[0].max_score, 8);
        assert!(grid.edit_session().is_none());

        grid.begin_edit(0, Field::Name);
        grid.handle_event(&Event::Paste(PasteEvent::bracketed("!!")));
        assert!(grid.handle_event(&key(KeyCode::Escape)));
        assert_eq!(grid.criteria()[0].name, "Clarity");
    }

    #[test]
    fn description_needs_primary_enter() {
        let (mut grid, _) = published();
        grid.begin_edit(1, Field::Description);
        grid.handle_event(&key(KeyCode::Enter));
        grid.handle_event(&key(KeyCode::Char('x')));
        assert!(grid.edit_session().is_some());
        let commit = Event::Key(KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::SUPER));
        assert!(grid.handle_event(&commit));
        assert_eq!(grid.criteria()[1].description, "Covers the topic\nx");
    }

    #[test]
    fn blur_commits_active_session() {
        let (mut grid, _) = published();
        grid.begin_edit(0, Field::Name);
        grid.update_transient("Focus");
        assert!(grid.handle_event(&Event::Focus(false)));
        assert_eq!(grid.criteria()[0].name, "Focus");
        assert!(!grid.handle_event(&Event::Focus(false)));
        assert!(!grid.handle_event(&Event::Focus(true)));
    }

    #[test]
    fn structural_ops_need_a_sink() {
        let mut grid = GridController::new(sample(), GridConfig::default());
        assert!(!grid.add_criterion());
        assert!(!grid.delete_criterion(0));
        assert_eq!(grid.criteria().len(), 2);
        assert!(!grid.can_delete_row(0));
    }

    #[test]
    fn delete_removes_by_index_and_cancels_edit() {
        let (mut grid, log) = published();
        grid.begin_edit(1, Field::Name);
        assert!(grid.delete_criterion(0));
        assert!(grid.edit_session().is_none());
        assert_eq!(grid.criteria(), &[Criterion::new("Depth", "Covers the topic")]);
        assert!(grid.is_dirty());
        assert!(!grid.can_delete_row(0));
        assert!(!grid.delete_criterion(5));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn delete_clears_highlight_on_shifted_rows() {
        let (mut grid, _) = published();
        grid.request_highlight(1, Field::Description);
        grid.delete_criterion(1);
        assert!(grid.highlight().is_none());

        grid.add_criterion();
        grid.request_highlight(0, Field::Name);
        grid.delete_criterion(1);
        assert_eq!(grid.highlight(), Some(HighlightRequest::new(0, Field::Name)));
    }

    #[test]
    fn rename_same_name_is_noop() {
        let (mut grid, log) = published();
        assert!(!grid.rename_rubric("Essay"));
        assert!(grid.rename_rubric("Essay II"));
        assert_eq!(*log.borrow(), vec![GridEvent::NameChanged("Essay II".into())]);
    }

    #[test]
    fn save_commits_pending_edit_then_requests() {
        let (mut grid, log) = published();
        grid.begin_edit(0, Field::Name);
        grid.update_transient("Style");
        assert_eq!(grid.save(), SaveOutcome::Requested);
        assert_eq!(grid.criteria()[0].name, "Style");
        assert_eq!(log.borrow().last(), Some(&GridEvent::SaveRequested));
    }

    #[test]
    fn blocked_save_highlights_first_offender_only() {
        let (mut grid, log) = published();
        grid.add_criterion();
        grid.add_criterion();
        let outcome = grid.save();
        assert_eq!(
            outcome,
            SaveOutcome::Blocked(vec![
                MissingField::new(2, Field::Name),
                MissingField::new(2, Field::Description),
                MissingField::new(3, Field::Name),
                MissingField::new(3, Field::Description),
            ])
        );
        assert_eq!(grid.highlight(), Some(HighlightRequest::new(2, Field::Name)));
        let notifies = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, GridEvent::Notify(_)))
            .count();
        assert_eq!(notifies, 1);
        assert!(!log.borrow().contains(&GridEvent::SaveRequested));
    }

    #[test]
    fn revert_restores_baseline_and_is_clean() {
        let (mut grid, log) = published();
        grid.rename_rubric("Changed");
        grid.add_criterion();
        assert!(grid.is_dirty());
        assert!(grid.revert());
        assert_eq!(grid.rubric(), &sample());
        assert!(!grid.is_dirty());
        assert_eq!(log.borrow().last(), Some(&GridEvent::RevertRequested));
    }

    #[test]
    fn revert_without_baseline_is_noop() {
        let (mut grid, log) = recording(GridController::new(sample(), GridConfig::default()));
        assert!(!grid.revert());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn duplicate_and_delete_are_pass_through() {
        let (mut grid, log) = published();
        grid.duplicate();
        grid.delete_rubric();
        assert_eq!(
            *log.borrow(),
            vec![GridEvent::DuplicateRequested, GridEvent::DeleteRequested]
        );
        assert_eq!(grid.rubric(), &sample());
    }

    #[test]
    fn load_with_new_identity_suppresses_dirty_once() {
        let (mut grid, _) = published();
        let other = Rubric::new("Other", vec![Criterion::new("a", "b")]);
        // Stale baseline: would be dirty, but the identity just changed.
        grid.load(Some(RubricId::new("r2")), other.clone(), Some(sample()));
        assert!(!grid.is_dirty());
        grid.set_baseline(Some(other));
        assert!(!grid.is_dirty());
        grid.rename_rubric("Other 2");
        assert!(grid.is_dirty());
    }

    #[test]
    fn tick_expires_highlight_and_notification_independently() {
        let config = GridConfig::default()
            .highlight_window(Duration::from_secs(4))
            .notification_duration(Duration::from_secs(5));
        let (mut grid, _) = recording(GridController::new(Rubric::draft(&config.defaults), config));
        grid.save();
        assert!(grid.highlight().is_some());
        assert!(grid.notification().is_some());
        assert!(grid.tick(Duration::from_secs(4)));
        assert!(grid.highlight().is_none());
        assert!(grid.notification().is_some());
        assert!(grid.tick(Duration::from_secs(1)));
        assert!(grid.notification().is_none());
        assert!(!grid.tick(Duration::from_secs(1)));
    }

    #[test]
    fn dismiss_notification_closes_immediately() {
        let (mut grid, _) = published();
        grid.begin_edit(0, Field::MinScore);
        grid.update_transient("50");
        grid.commit();
        assert!(grid.dismiss_notification());
        assert!(grid.notification().is_none());
        assert!(!grid.dismiss_notification());
    }

    #[test]
    fn external_handle_drives_grid_highlight() {
        let (grid, _) = published();
        let handle = grid.highlight_handle();
        handle.request(1, Field::PassScore);
        assert!(grid.is_row_highlighted(1));
        assert!(!grid.is_row_highlighted(0));
    }
}
