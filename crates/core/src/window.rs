//! Daily windows over the sentence pool.
//!
//! Day `n` covers the pool slice `[(n - 1) * W, n * W)`, clipped to the pool.
//! A day past the end of the pool yields an empty window rather than an error.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::model::{DayNumber, SentenceId, SentenceRecord};

/// Sentences per day unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(size) => size,
    None => unreachable!(),
};

/// Index range of `day`'s window in a pool of `pool_size` sentences.
#[must_use]
pub fn window_range(day: DayNumber, pool_size: usize, window_size: NonZeroUsize) -> Range<usize> {
    let days_before = usize::try_from(day.value() - 1).unwrap_or(usize::MAX);
    let start = days_before.saturating_mul(window_size.get());
    if start >= pool_size {
        return pool_size..pool_size;
    }
    let end = start.saturating_add(window_size.get()).min(pool_size);
    start..end
}

/// Borrow `day`'s sentences from the pool.
#[must_use]
pub fn get_window(
    pool: &[SentenceRecord],
    day: DayNumber,
    window_size: NonZeroUsize,
) -> &[SentenceRecord] {
    &pool[window_range(day, pool.len(), window_size)]
}

/// Number of days with at least one sentence.
#[must_use]
pub fn day_count(pool_size: usize, window_size: NonZeroUsize) -> usize {
    pool_size.div_ceil(window_size.get())
}

/// Owned snapshot of one day's sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    day: DayNumber,
    offset: usize,
    sentences: Vec<SentenceRecord>,
}

impl DayWindow {
    #[must_use]
    pub fn from_pool(pool: &[SentenceRecord], day: DayNumber, window_size: NonZeroUsize) -> Self {
        let range = window_range(day, pool.len(), window_size);
        Self {
            day,
            offset: range.start,
            sentences: pool[range].to_vec(),
        }
    }

    #[must_use]
    pub fn day(&self) -> DayNumber {
        self.day
    }

    /// Pool index of the first sentence in the window.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn sentences(&self) -> &[SentenceRecord] {
        &self.sentences
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Whether `id` falls inside this window.
    #[must_use]
    pub fn contains(&self, id: SentenceId) -> bool {
        (self.offset..self.offset + self.sentences.len()).contains(&id.index())
    }

    pub fn ids(&self) -> impl Iterator<Item = SentenceId> + '_ {
        self.sentences.iter().map(SentenceRecord::id)
    }
}

//
// ─── DAY SELECTOR ──────────────────────────────────────────────────────────────
//

/// Picks which day is "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    /// Pinned at construction; movement requests are ignored.
    Fixed(DayNumber),
    /// Moves only when asked to.
    Advancing(DayNumber),
}

impl DaySelector {
    #[must_use]
    pub fn current(&self) -> DayNumber {
        match self {
            DaySelector::Fixed(day) | DaySelector::Advancing(day) => *day,
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, DaySelector::Fixed(_))
    }

    /// Move to the next day. Returns whether the day changed.
    pub fn advance(&mut self) -> bool {
        let next = self.current().next();
        self.go_to(next)
    }

    /// Move to the previous day, stopping at day 1. Returns whether the day changed.
    pub fn go_back(&mut self) -> bool {
        match self.current().previous() {
            Some(previous) => self.go_to(previous),
            None => false,
        }
    }

    /// Jump to `day`. Returns whether the day changed.
    pub fn go_to(&mut self, day: DayNumber) -> bool {
        match self {
            DaySelector::Fixed(_) => false,
            DaySelector::Advancing(current) => {
                let changed = *current != day;
                *current = day;
                changed
            }
        }
    }
}

impl Default for DaySelector {
    fn default() -> Self {
        DaySelector::Advancing(DayNumber::FIRST)
    }
}
