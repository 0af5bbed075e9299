#![forbid(unsafe_code)]

//! Notification emitter: a single-slot, auto-dismissing message.
//!
//! The grid decides *that* a message must be shown (title, body, icon,
//! duration); drawing it is the host's business. At most one notification is
//! visible. Showing a new one replaces the current one together with its
//! countdown, and an explicit [`NotificationSlot::dismiss`] drops both.
//!
//! # Example
//!
//! ```rust
//! use rubric_grid::notification::{Notification, NotificationIcon, NotificationSlot};
//! use std::time::Duration;
//!
//! let mut slot = NotificationSlot::new();
//! slot.show(Notification::new("Saved", "Rubric stored").icon(NotificationIcon::Success));
//! assert!(slot.is_visible());
//! assert!(slot.tick(Duration::from_secs(5)));
//! assert!(!slot.is_visible());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::deadline::Deadline;

/// Default auto-dismiss duration.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

impl NotificationId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Icon displayed with the notification to indicate message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationIcon {
    /// Success indicator (checkmark).
    Success,
    /// Error indicator (X mark).
    Error,
    /// Warning indicator (exclamation).
    Warning,
    /// Information indicator (i).
    #[default]
    Info,
}

impl NotificationIcon {
    /// Stable name for hosts that map icons to their own assets.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub icon: NotificationIcon,
    /// How long the host should keep it on screen.
    pub duration: Duration,
}

impl Notification {
    /// Create a notification with the default icon and duration.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            title: title.into(),
            body: body.into(),
            icon: NotificationIcon::default(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Set the icon.
    #[must_use]
    pub fn icon(mut self, icon: NotificationIcon) -> Self {
        self.icon = icon;
        self
    }

    /// Set the auto-dismiss duration.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Duration in whole milliseconds, as handed to host renderers.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone)]
struct Active {
    notification: Notification,
    deadline: Deadline,
}

/// Holds at most one visible notification and its countdown.
#[derive(Debug, Clone, Default)]
pub struct NotificationSlot {
    active: Option<Active>,
}

impl NotificationSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, replacing whatever is currently visible.
    ///
    /// Returns the replaced notification, if any.
    pub fn show(&mut self, notification: Notification) -> Option<Notification> {
        let deadline = Deadline::new(notification.duration);
        self.active
            .replace(Active {
                notification,
                deadline,
            })
            .map(|previous| previous.notification)
    }

    /// Close the current notification immediately, cancelling its countdown.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.active.take().map(|active| active.notification)
    }

    /// Advance the countdown. Returns `true` if the notification expired on
    /// this tick and was removed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let expired = self
            .active
            .as_mut()
            .is_some_and(|active| active.deadline.tick(delta));
        if expired {
            self.active = None;
        }
        expired
    }

    /// The visible notification, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.active.as_ref().map(|active| &active.notification)
    }

    /// Whether a notification is visible.
    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    /// Time left before the visible notification auto-dismisses.
    pub fn remaining(&self) -> Option<Duration> {
        self.active.as_ref().map(|active| active.deadline.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_builder() {
        let n = Notification::new("Incorrect Value", "nope")
            .icon(NotificationIcon::Error)
            .duration(Duration::from_secs(2));
        assert_eq!(n.title, "Incorrect Value");
        assert_eq!(n.body, "nope");
        assert_eq!(n.icon, NotificationIcon::Error);
        assert_eq!(n.duration_ms(), 2000);
    }

    #[test]
    fn default_duration_is_five_seconds() {
        assert_eq!(Notification::new("t", "b").duration_ms(), 5000);
    }

    #[test]
    fn ids_are_unique() {
        let a = Notification::new("a", "");
        let b = Notification::new("b", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn icon_names_are_stable() {
        assert_eq!(NotificationIcon::Success.as_str(), "success");
        assert_eq!(NotificationIcon::Error.as_str(), "error");
        assert_eq!(NotificationIcon::Warning.as_str(), "warning");
        assert_eq!(NotificationIcon::default().as_str(), "info");
    }

    #[test]
    fn auto_dismiss_after_duration() {
        let mut slot = NotificationSlot::new();
        slot.show(Notification::new("t", "b"));
        assert!(!slot.tick(Duration::from_millis(4999)));
        assert_eq!(slot.remaining(), Some(Duration::from_millis(1)));
        assert!(slot.tick(Duration::from_millis(1)));
        assert!(slot.current().is_none());
        assert!(!slot.tick(Duration::from_secs(10)));
    }

    #[test]
    fn new_notification_replaces_and_restarts_countdown() {
        let mut slot = NotificationSlot::new();
        slot.show(Notification::new("first", ""));
        slot.tick(Duration::from_secs(4));
        let replaced = slot.show(Notification::new("second", ""));
        assert_eq!(replaced.map(|n| n.title), Some("first".to_string()));

        // The first countdown would have fired here; the second must not.
        assert!(!slot.tick(Duration::from_secs(1)));
        assert_eq!(slot.current().map(|n| n.title.as_str()), Some("second"));
        assert!(slot.tick(Duration::from_secs(4)));
    }

    #[test]
    fn dismiss_cancels_countdown() {
        let mut slot = NotificationSlot::new();
        slot.show(Notification::new("t", ""));
        assert!(slot.dismiss().is_some());
        assert!(!slot.is_visible());
        assert!(!slot.tick(Duration::from_secs(10)));
        assert!(slot.dismiss().is_none());
    }
}
