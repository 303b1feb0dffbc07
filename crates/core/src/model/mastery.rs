use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::progress::{ProgressEntry, ProgressError};

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// Which mastery rule the tracker runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryMode {
    /// Viewing completes a sentence; the second view masters it.
    #[default]
    Auto,
    /// Learners flip completed and mastered themselves.
    Manual,
}

impl MasteryMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryMode::Auto => "auto",
            MasteryMode::Manual => "manual",
        }
    }

    #[must_use]
    pub fn policy(self) -> Arc<dyn MasteryPolicy> {
        match self {
            MasteryMode::Auto => Arc::new(AutoMasteryPolicy),
            MasteryMode::Manual => Arc::new(ManualMasteryPolicy),
        }
    }
}

impl fmt::Display for MasteryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown mastery mode {0:?} (expected `auto` or `manual`)")]
pub struct ParseMasteryModeError(String);

impl FromStr for MasteryMode {
    type Err = ParseMasteryModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(MasteryMode::Auto),
            "manual" => Ok(MasteryMode::Manual),
            _ => Err(ParseMasteryModeError(s.to_string())),
        }
    }
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// Transition rules for a `ProgressEntry`.
///
/// Every method takes the current entry and returns the next one; the caller
/// stores the result only on success, so a rejected transition leaves the
/// stored state untouched.
pub trait MasteryPolicy: fmt::Debug + Send + Sync {
    fn mode(&self) -> MasteryMode;

    /// Apply one view of the sentence.
    fn record_view(&self, entry: &ProgressEntry, now: DateTime<Utc>) -> ProgressEntry;

    /// Flip the completed flag.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ManualToggleUnavailable` unless the policy allows toggles.
    fn toggle_completed(
        &self,
        _entry: &ProgressEntry,
        _now: DateTime<Utc>,
    ) -> Result<ProgressEntry, ProgressError> {
        Err(ProgressError::ManualToggleUnavailable {
            policy: self.mode().as_str(),
        })
    }

    /// Flip the mastered flag.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ManualToggleUnavailable` unless the policy allows toggles.
    fn toggle_mastered(&self, _entry: &ProgressEntry) -> Result<ProgressEntry, ProgressError> {
        Err(ProgressError::ManualToggleUnavailable {
            policy: self.mode().as_str(),
        })
    }
}

/// Mastery follows from the view count: one view completes, two master.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoMasteryPolicy;

impl MasteryPolicy for AutoMasteryPolicy {
    fn mode(&self) -> MasteryMode {
        MasteryMode::Auto
    }

    fn record_view(&self, entry: &ProgressEntry, now: DateTime<Utc>) -> ProgressEntry {
        let mut next = entry.clone();
        next.note_view(now);
        next.set_completed(true);
        next.set_mastered(next.view_count() >= 2);
        next
    }
}

/// Completed and mastered are explicit learner choices.
///
/// Mastery requires completion; clearing completion clears mastery too.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualMasteryPolicy;

impl MasteryPolicy for ManualMasteryPolicy {
    fn mode(&self) -> MasteryMode {
        MasteryMode::Manual
    }

    fn record_view(&self, entry: &ProgressEntry, now: DateTime<Utc>) -> ProgressEntry {
        let mut next = entry.clone();
        next.note_view(now);
        next
    }

    fn toggle_completed(
        &self,
        entry: &ProgressEntry,
        now: DateTime<Utc>,
    ) -> Result<ProgressEntry, ProgressError> {
        let mut next = entry.clone();
        let completed = !entry.is_completed();
        // A completed sentence has been seen at least once.
        if completed && next.is_untouched() {
            next.note_view(now);
        }
        next.set_completed(completed);
        Ok(next)
    }

    fn toggle_mastered(&self, entry: &ProgressEntry) -> Result<ProgressEntry, ProgressError> {
        if !entry.is_completed() {
            return Err(ProgressError::NotCompleted(entry.sentence_id()));
        }
        let mut next = entry.clone();
        next.set_mastered(!entry.is_mastered());
        Ok(next)
    }
}
