use std::num::NonZeroUsize;
use std::sync::Arc;

use daily_core::model::{DayNumber, SentenceId, SentenceRecord};
use daily_core::window::DayWindow;
use storage::SentencePool;

/// Cuts the sentence pool into daily windows.
#[derive(Clone)]
pub struct DayService {
    sentences: Arc<SentencePool>,
    window_size: NonZeroUsize,
}

impl DayService {
    #[must_use]
    pub fn new(sentences: Arc<SentencePool>, window_size: NonZeroUsize) -> Self {
        Self {
            sentences,
            window_size,
        }
    }

    #[must_use]
    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.sentences.len()
    }

    /// Sentences for `day`; empty once the pool runs out.
    #[must_use]
    pub fn window(&self, day: DayNumber) -> DayWindow {
        self.sentences.window(day, self.window_size)
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.sentences.day_count(self.window_size)
    }

    /// Whether `day` has at least one sentence.
    #[must_use]
    pub fn has_day(&self, day: DayNumber) -> bool {
        usize::try_from(day.value()).is_ok_and(|day| day <= self.day_count())
    }

    #[must_use]
    pub fn sentence(&self, id: SentenceId) -> Option<&SentenceRecord> {
        self.sentences.get(id)
    }
}
