#![forbid(unsafe_code)]

//! Cell edit controller: the single in-progress cell edit.
//!
//! At most one [`EditSession`] exists at a time, held as an `Option` so "one
//! edit at a time" is structural. Starting a new session silently discards
//! the previous one; partial edits are never auto-saved.
//!
//! The transient text is edited freely (grapheme-cluster aware) with no
//! validation at all, so intermediate states like `"1"` on the way to `"10"`
//! are fine. Validation happens once, in [`CellEditor::commit`].
//!
//! # Keyboard contract
//!
//! | Key | Effect |
//! |-----|--------|
//! | Enter | commit, except in `description` where it inserts `\n` |
//! | Ctrl/Cmd+Enter | commit (any field) |
//! | Escape | cancel |
//! | printable char | insert at cursor |
//! | Backspace / Delete | remove one grapheme before / after the cursor |
//! | Left / Right / Home / End | move the cursor |

use rubric_core::event::{KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;

use crate::criterion::{Criterion, Field};
use crate::validation::{EditViolation, ScoreParseError, parse_score, validate_edit};

// ---------------------------------------------------------------------------
// EditSession
// ---------------------------------------------------------------------------

/// The cell being edited and its uncommitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    row: usize,
    field: Field,
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
}

impl EditSession {
    /// Open a session on `(row, field)` seeded from the committed value.
    #[must_use]
    pub fn new(row: usize, field: Field, criterion: &Criterion) -> Self {
        let value = criterion.display_value(field);
        let cursor = value.graphemes(true).count();
        Self {
            row,
            field,
            value,
            cursor,
        }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    /// The transient (uncommitted) text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the transient text wholesale, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        let before = self.grapheme_count();
        self.value.insert_str(byte_offset, text);
        // Combining marks and joiners may merge with neighbouring graphemes.
        let after = self.grapheme_count();
        self.cursor = (self.cursor + after).saturating_sub(before).min(after);
    }

    fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    fn delete_char_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.cursor - 1);
        let byte_end = self.grapheme_byte_offset(self.cursor);
        self.value.drain(byte_start..byte_end);
        self.cursor -= 1;
        true
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.cursor);
        let byte_end = self.grapheme_byte_offset(self.cursor + 1);
        self.value.drain(byte_start..byte_end);
        true
    }

    fn move_to(&mut self, target: usize) -> bool {
        let target = target.min(self.grapheme_count());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(offset, _)| offset)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What a key press asks the owner of the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Commit the session.
    Commit,
    /// Cancel the session.
    Cancel,
    /// The transient text or cursor changed.
    Edited,
    /// Not consumed.
    Ignored,
}

/// Result of committing the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The new value was written.
    Applied { row: usize, field: Field },
    /// The committed value equals the transient text; nothing to write.
    Unchanged { row: usize, field: Field },
    /// A score invariant would break; the prior value is kept.
    Rejected {
        row: usize,
        field: Field,
        violation: EditViolation,
    },
    /// Unparseable or negative score text; silently dropped.
    Discarded {
        row: usize,
        field: Field,
        reason: ScoreParseError,
    },
    /// The session pointed at a row that no longer exists.
    StaleRow { row: usize },
    /// No session was active.
    NoSession,
}

impl CommitOutcome {
    /// Whether the model was modified.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

// ---------------------------------------------------------------------------
// CellEditor
// ---------------------------------------------------------------------------

/// Owner of the (at most one) active edit session.
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    session: Option<EditSession>,
}

impl CellEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `(row, field)`, discarding any session in progress.
    ///
    /// Returns the discarded session, uncommitted.
    pub fn begin(&mut self, row: usize, field: Field, criterion: &Criterion) -> Option<EditSession> {
        self.session.replace(EditSession::new(row, field, criterion))
    }

    /// Replace the transient text. No validation. Returns `false` when idle.
    pub fn update_transient(&mut self, value: impl Into<String>) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Insert pasted text at the cursor. Returns `false` when idle.
    pub fn paste(&mut self, text: &str) -> bool {
        match self.session.as_mut() {
            Some(session) if !text.is_empty() => {
                session.insert_str(text);
                true
            }
            _ => false,
        }
    }

    /// Drop the session without touching the model.
    pub fn cancel(&mut self) -> Option<EditSession> {
        self.session.take()
    }

    #[must_use]
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `(row, field)` is the cell being edited.
    #[must_use]
    pub fn is_editing_cell(&self, row: usize, field: Field) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.row == row && s.field == field)
    }

    /// End the session, writing its value into `criteria` if valid.
    ///
    /// Text fields are written verbatim, empty included. Score fields must
    /// parse as non-negative integers and keep the score invariants; anything
    /// else leaves the model untouched. The session ends in every case.
    pub fn commit(&mut self, criteria: &mut [Criterion]) -> CommitOutcome {
        let Some(session) = self.session.take() else {
            return CommitOutcome::NoSession;
        };
        let EditSession {
            row, field, value, ..
        } = session;
        let Some(criterion) = criteria.get_mut(row) else {
            return CommitOutcome::StaleRow { row };
        };

        if !field.is_numeric() {
            if criterion.text(field) == Some(value.as_str()) {
                return CommitOutcome::Unchanged { row, field };
            }
            criterion.set_text(field, value);
            return CommitOutcome::Applied { row, field };
        }

        let proposed = match parse_score(&value) {
            Ok(score) => score,
            Err(reason) => return CommitOutcome::Discarded { row, field, reason },
        };
        if criterion.score(field) == Some(proposed) {
            return CommitOutcome::Unchanged { row, field };
        }
        if let Err(violation) = validate_edit(field, proposed, criterion) {
            return CommitOutcome::Rejected {
                row,
                field,
                violation,
            };
        }
        criterion.set_score(field, proposed);
        CommitOutcome::Applied { row, field }
    }

    /// Apply a key press to the session.
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !key.is_actionable() {
            return KeyOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key.code {
            KeyCode::Escape => KeyOutcome::Cancel,
            KeyCode::Enter if key.primary() || !session.field.is_multiline() => KeyOutcome::Commit,
            KeyCode::Enter => {
                session.insert_char('\n');
                KeyOutcome::Edited
            }
            KeyCode::Char(c) if !key.primary() => {
                session.insert_char(c);
                KeyOutcome::Edited
            }
            KeyCode::Backspace => edited(session.delete_char_back()),
            KeyCode::Delete => edited(session.delete_char_forward()),
            KeyCode::Left => edited(session.move_to(session.cursor.saturating_sub(1))),
            KeyCode::Right => edited(session.move_to(session.cursor + 1)),
            KeyCode::Home => edited(session.move_to(0)),
            KeyCode::End => edited(session.move_to(usize::MAX)),
            _ => KeyOutcome::Ignored,
        }
    }
}

fn edited(changed: bool) -> KeyOutcome {
    if changed {
        KeyOutcome::Edited
    } else {
        KeyOutcome::Ignored
    }
}
