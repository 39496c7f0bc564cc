//! Quiet hours window value object

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Strict `HH:MM` (24h) format accepted by config validation
static TIME_FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time format regex is valid")
});

/// Check that a bound is in strict `HH:MM` format
pub fn is_valid_time_format(s: &str) -> bool {
    TIME_FORMAT_RE.is_match(s)
}

/// Do-not-disturb window given as two `HH:MM` wall-clock bounds.
///
/// Either bound may be empty, which disables the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl QuietHours {
    /// Create a window from two `HH:MM` bounds
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both bounds are set (not necessarily well-formed)
    pub fn is_configured(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    /// Check whether `now` falls inside the window.
    ///
    /// Unparseable bounds and `start == end` both count as disabled. A window
    /// with `start > end` wraps midnight. The end bound is exclusive.
    pub fn contains(&self, now: NaiveTime) -> bool {
        if !self.is_configured() {
            return false;
        }

        let (Some(start), Some(end)) = (
            parse_time_to_minutes(&self.start),
            parse_time_to_minutes(&self.end),
        ) else {
            return false;
        };

        let current = now.hour() * 60 + now.minute();

        if start == end {
            return false;
        }

        if start > end {
            return current >= start || current < end;
        }

        current >= start && current < end
    }
}

/// Convert `HH:MM` to minutes since midnight (0-1439)
pub fn parse_time_to_minutes(s: &str) -> Option<u32> {
    let (hours, minutes) = s.split_once(':')?;
    if minutes.contains(':') {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}
