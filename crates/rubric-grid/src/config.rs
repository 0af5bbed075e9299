#![forbid(unsafe_code)]

//! Grid configuration with environment overrides.
//!
//! Highlights last 4 s and notifications 5 s; new criteria are seeded with
//! scores 1/5/3. Hosts can tune timings without a rebuild through
//! environment variables. Values that fail to parse are ignored and the
//! default stays in place.

use std::time::Duration;

use crate::criterion::CriterionDefaults;
use crate::highlight::DEFAULT_HIGHLIGHT_WINDOW;
use crate::notification::DEFAULT_NOTIFICATION_DURATION;

/// Environment variable overriding the highlight window (milliseconds).
pub const ENV_HIGHLIGHT_MS: &str = "RUBRIC_HIGHLIGHT_MS";
/// Environment variable overriding the notification duration (milliseconds).
pub const ENV_NOTIFICATION_MS: &str = "RUBRIC_NOTIFICATION_MS";
/// Environment variable forcing read-only mode (`1/0/true/false`).
pub const ENV_READ_ONLY: &str = "RUBRIC_READ_ONLY";

/// Grid controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// How long a highlighted row stays flagged.
    pub highlight_window: Duration,
    /// How long a notification stays visible.
    pub notification_duration: Duration,
    /// Scores for new criteria; also "untouched" for draft dirty checks.
    pub defaults: CriterionDefaults,
    /// Refuse to start edits or rename.
    pub read_only: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            highlight_window: DEFAULT_HIGHLIGHT_WINDOW,
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            defaults: CriterionDefaults::default(),
            read_only: false,
        }
    }
}

impl GridConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with process environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(window) = env_millis(&get_env, ENV_HIGHLIGHT_MS) {
            config.highlight_window = window;
        }
        if let Some(duration) = env_millis(&get_env, ENV_NOTIFICATION_MS) {
            config.notification_duration = duration;
        }
        if let Some(read_only) = get_env(ENV_READ_ONLY).and_then(|v| parse_bool(&v)) {
            config.read_only = read_only;
        }
        config
    }

    /// Set the highlight window.
    #[must_use]
    pub fn highlight_window(mut self, window: Duration) -> Self {
        self.highlight_window = window;
        self
    }

    /// Set the notification duration.
    #[must_use]
    pub fn notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    /// Set the scores used for new criteria.
    #[must_use]
    pub fn defaults(mut self, defaults: CriterionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set read-only mode.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_millis<F>(get_env: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}
