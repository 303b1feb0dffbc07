use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ProgressEntry;
use crate::window::DayWindow;

/// What "total" means for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DailyTarget {
    /// Number of sentences actually in the window.
    #[default]
    WindowLength,
    /// A fixed goal, regardless of how short the window is.
    Fixed(u32),
}

impl DailyTarget {
    #[must_use]
    pub fn total_for(self, window: &DayWindow) -> u32 {
        match self {
            DailyTarget::WindowLength => u32::try_from(window.len()).unwrap_or(u32::MAX),
            DailyTarget::Fixed(total) => total,
        }
    }
}

impl fmt::Display for DailyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyTarget::WindowLength => f.write_str("window"),
            DailyTarget::Fixed(total) => write!(f, "{total}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid daily target {0:?} (expected `window` or a number)")]
pub struct ParseDailyTargetError(String);

impl FromStr for DailyTarget {
    type Err = ParseDailyTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("window") {
            return Ok(DailyTarget::WindowLength);
        }
        trimmed
            .parse::<u32>()
            .map(DailyTarget::Fixed)
            .map_err(|_| ParseDailyTargetError(s.to_string()))
    }
}

/// Derived counts for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total: u32,
    pub completed: u32,
    pub mastered: u32,
    pub remaining: u32,
    pub percent: u8,
}

impl ProgressStats {
    /// Stats for raw counts.
    #[must_use]
    pub fn from_counts(total: u32, completed: u32, mastered: u32) -> Self {
        Self {
            total,
            completed,
            mastered,
            remaining: total.saturating_sub(completed),
            percent: percent(completed, total),
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.total > 0 && self.remaining == 0
    }
}

/// Count completed and mastered entries inside `window`.
///
/// Entries outside the window are ignored, and an id is counted once even if
/// it appears more than once.
pub fn compute_stats<'a>(
    entries: impl IntoIterator<Item = &'a ProgressEntry>,
    window: &DayWindow,
    target: DailyTarget,
) -> ProgressStats {
    let mut seen = HashSet::new();
    let mut completed = 0_u32;
    let mut mastered = 0_u32;

    for entry in entries {
        let id = entry.sentence_id();
        if !window.contains(id) || !seen.insert(id) {
            continue;
        }
        if entry.is_completed() {
            completed = completed.saturating_add(1);
        }
        if entry.is_mastered() {
            mastered = mastered.saturating_add(1);
        }
    }

    ProgressStats::from_counts(target.total_for(window), completed, mastered)
}

/// `round(100 * part / total)` with halves rounded up, 0 for an empty total, capped at 100.
#[must_use]
pub fn percent(part: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = u64::from(part.min(total));
    let total = u64::from(total);
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}
