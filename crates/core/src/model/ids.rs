use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

/// Stable identifier of a sentence: its position in the sentence pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SentenceId(usize);

impl SentenceId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in the pool.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }

    /// One-based number shown to learners (`#1`, `#2`, ...).
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.0.saturating_add(1)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DayError {
    #[error("day numbers start at 1")]
    Zero,
}

/// One-based number of a learning day.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayNumber(NonZeroU32);

impl DayNumber {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// # Errors
    ///
    /// Returns `DayError::Zero` for day 0.
    pub fn new(day: u32) -> Result<Self, DayError> {
        NonZeroU32::new(day).map(Self).ok_or(DayError::Zero)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0.get()
    }

    /// The following day, saturating at `u32::MAX`.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The previous day, or `None` on day 1.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        NonZeroU32::new(self.0.get() - 1).map(Self)
    }
}

impl Default for DayNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SentenceId({})", self.0)
    }
}

impl fmt::Debug for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayNumber({})", self.0)
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id or day from a string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse {kind} from {raw:?}")]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl FromStr for SentenceId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(SentenceId::new)
            .map_err(|_| ParseIdError {
                kind: "SentenceId",
                raw: s.to_string(),
            })
    }
}

impl FromStr for DayNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(|day| DayNumber::new(day).ok())
            .ok_or_else(|| ParseIdError {
                kind: "DayNumber",
                raw: s.to_string(),
            })
    }
}
