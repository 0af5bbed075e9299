#![forbid(unsafe_code)]

//! Highlight signal: a single-slot channel for pointing at one grid cell.
//!
//! Any component that knows about a specific criterion (for example a
//! question whose scoring failed on the second parameter) can ask the grid to
//! flag that row without holding a reference to the grid itself. It only
//! needs a clone of the [`HighlightSignal`].
//!
//! # Design
//!
//! [`HighlightSignal`] wraps its state in shared, reference-counted storage
//! (`Rc<RefCell<..>>`); clones are handles to the same slot. The slot holds
//! at most one [`HighlightRequest`] plus the [`Deadline`] that will clear it.
//! A new request replaces both, so the countdown of a superseded request
//! cannot clear the newer one.
//!
//! Observers register with [`HighlightSignal::subscribe`] and receive the new
//! slot content (`Some` on request, `None` on clear or expiry) in
//! registration order. They are held weakly; dropping the returned
//! [`Subscription`] unsubscribes.
//!
//! # Invariants
//!
//! 1. At most one request is active.
//! 2. `version` increments by exactly 1 on every change of slot content.
//! 3. The signal is informational: it never touches criteria.
//!
//! # Failure Modes
//!
//! - **Re-entrant request**: subscribers may call [`HighlightSignal::request`]
//!   from their callback; the borrow is released before callbacks run.
//! - **Subscriber leak**: dead weak references are pruned lazily on the next
//!   notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::criterion::Field;
use crate::deadline::Deadline;

/// Default time a highlight stays visible.
pub const DEFAULT_HIGHLIGHT_WINDOW: Duration = Duration::from_secs(4);

/// A request to flag one cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightRequest {
    pub row: usize,
    pub field: Field,
}

impl HighlightRequest {
    #[must_use]
    pub const fn new(row: usize, field: Field) -> Self {
        Self { row, field }
    }
}

type CallbackRc = Rc<dyn Fn(Option<HighlightRequest>)>;
type CallbackWeak = Weak<dyn Fn(Option<HighlightRequest>)>;

struct SignalInner {
    active: Option<(HighlightRequest, Deadline)>,
    window: Duration,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// Shared handle to the grid's highlight slot.
///
/// Cloning creates another handle to the **same** slot.
#[derive(Clone)]
pub struct HighlightSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl fmt::Debug for HighlightSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HighlightSignal")
            .field("active", &inner.active.as_ref().map(|(request, _)| request))
            .field("window", &inner.window)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl Default for HighlightSignal {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_WINDOW)
    }
}

impl HighlightSignal {
    /// Create an empty signal whose highlights last `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                active: None,
                window,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Flag `(row, field)`, superseding any active highlight and restarting
    /// the countdown.
    pub fn request(&self, row: usize, field: Field) {
        let request = HighlightRequest::new(row, field);
        {
            let mut inner = self.inner.borrow_mut();
            let deadline = Deadline::new(inner.window);
            inner.active = Some((request, deadline));
            inner.version += 1;
        }
        self.notify(Some(request));
    }

    /// Remove the active highlight early. Returns `true` if one was active.
    pub fn clear(&self) -> bool {
        let cleared = {
            let mut inner = self.inner.borrow_mut();
            let cleared = inner.active.take().is_some();
            if cleared {
                inner.version += 1;
            }
            cleared
        };
        if cleared {
            self.notify(None);
        }
        cleared
    }

    /// Advance the countdown. Returns `true` if the highlight expired on this
    /// tick.
    pub fn tick(&self, delta: Duration) -> bool {
        let expired = {
            let mut inner = self.inner.borrow_mut();
            let expired = inner
                .active
                .as_mut()
                .is_some_and(|(_, deadline)| deadline.tick(delta));
            if expired {
                inner.active = None;
                inner.version += 1;
            }
            expired
        };
        if expired {
            self.notify(None);
        }
        expired
    }

    /// The active highlight, if any.
    #[must_use]
    pub fn current(&self) -> Option<HighlightRequest> {
        self.inner.borrow().active.as_ref().map(|(request, _)| *request)
    }

    /// Whether `row` is currently flagged.
    #[must_use]
    pub fn is_row_highlighted(&self, row: usize) -> bool {
        self.current().is_some_and(|request| request.row == row)
    }

    /// Time left before the active highlight clears itself.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .active
            .as_ref()
            .map(|(_, deadline)| deadline.remaining())
    }

    /// Number of slot changes so far. Useful for dirty-checking in render
    /// loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Observe slot changes until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(Option<HighlightRequest>) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, value: Option<HighlightRequest>) {
        // Collect first so callbacks run without the borrow held.
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in callbacks {
            callback(value);
        }
    }
}

/// RAII guard for a highlight observer.
///
/// Dropping it makes the callback unreachable; the stale weak entry is
/// pruned on the next notification.
pub struct Subscription {
    _guard: CallbackRc,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
