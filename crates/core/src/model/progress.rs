use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::SentenceId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised by progress transitions.
///
/// A failed transition never modifies the entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    /// Mastery can only be toggled on a completed sentence.
    #[error("sentence {0} is not completed yet")]
    NotCompleted(SentenceId),

    /// The active mastery policy derives flags from views and has no toggles.
    #[error("manual toggles are not available under the {policy} mastery policy")]
    ManualToggleUnavailable { policy: &'static str },

    #[error("invalid progress state for sentence {id}: {reason}")]
    InvalidState { id: SentenceId, reason: &'static str },
}

//
// ─── PROGRESS ENTRY ────────────────────────────────────────────────────────────
//

/// Learning state of one sentence.
///
/// Invariants upheld by every constructor and transition:
/// - `mastered` implies `completed`
/// - `completed` implies `view_count >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    sentence_id: SentenceId,
    view_count: u32,
    completed: bool,
    mastered: bool,
    last_viewed: Option<DateTime<Utc>>,
}

impl ProgressEntry {
    /// The zero state of a sentence nobody has interacted with.
    #[must_use]
    pub fn new(sentence_id: SentenceId) -> Self {
        Self {
            sentence_id,
            view_count: 0,
            completed: false,
            mastered: false,
            last_viewed: None,
        }
    }

    /// Rebuild an entry from raw parts, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidState` if the parts contradict each other.
    pub fn from_parts(
        sentence_id: SentenceId,
        view_count: u32,
        completed: bool,
        mastered: bool,
        last_viewed: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if mastered && !completed {
            return Err(ProgressError::InvalidState {
                id: sentence_id,
                reason: "mastered without completed",
            });
        }
        if completed && view_count == 0 {
            return Err(ProgressError::InvalidState {
                id: sentence_id,
                reason: "completed without any view",
            });
        }

        Ok(Self {
            sentence_id,
            view_count,
            completed,
            mastered,
            last_viewed,
        })
    }

    #[must_use]
    pub fn sentence_id(&self) -> SentenceId {
        self.sentence_id
    }

    #[must_use]
    pub fn view_count(&self) -> u32 {
        self.view_count
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.mastered
    }

    #[must_use]
    pub fn last_viewed(&self) -> Option<DateTime<Utc>> {
        self.last_viewed
    }

    /// True when nothing has happened to this sentence yet.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.view_count == 0
    }

    /// Count one view. Flags are left to the mastery policy.
    pub(crate) fn note_view(&mut self, now: DateTime<Utc>) {
        self.view_count = self.view_count.saturating_add(1);
        self.last_viewed = Some(now);
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        if !completed {
            self.mastered = false;
        }
    }

    pub(crate) fn set_mastered(&mut self, mastered: bool) {
        self.mastered = mastered && self.completed;
    }
}
