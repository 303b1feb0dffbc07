//! The static sentence pool.
//!
//! The bundled corpus is a JSON array of `{ "source", "english" }` pairs. The
//! position of a pair in the array is its `SentenceId`.

use std::num::NonZeroUsize;

use daily_core::model::{DayNumber, SentenceError, SentenceId, SentenceRecord};
use daily_core::window::{DayWindow, day_count};
use serde::Deserialize;
use thiserror::Error;

const BUNDLED_SENTENCES: &str = include_str!("../data/sentences.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PoolError {
    #[error("malformed sentence data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sentence(#[from] SentenceError),
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    #[serde(alias = "telugu")]
    source: String,
    english: String,
}

/// Ordered, immutable list of sentence records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentencePool {
    sentences: Vec<SentenceRecord>,
}

impl SentencePool {
    /// Load the corpus shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `PoolError` if the bundled data is malformed.
    pub fn bundled() -> Result<Self, PoolError> {
        Self::from_json_str(BUNDLED_SENTENCES)
    }

    /// Parse a JSON array of sentence pairs.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Json` for malformed JSON and `PoolError::Sentence`
    /// for blank texts.
    pub fn from_json_str(raw: &str) -> Result<Self, PoolError> {
        let raw: Vec<RawSentence> = serde_json::from_str(raw)?;
        let pool = Self::from_pairs(raw.into_iter().map(|item| (item.source, item.english)))?;
        log::debug!("loaded sentence pool with {} sentences", pool.len());
        Ok(pool)
    }

    /// Build a pool from `(source, english)` pairs, assigning ids by position.
    ///
    /// # Errors
    ///
    /// Returns `SentenceError` if a pair has a blank text.
    pub fn from_pairs<S, E>(pairs: impl IntoIterator<Item = (S, E)>) -> Result<Self, SentenceError>
    where
        S: Into<String>,
        E: Into<String>,
    {
        let sentences = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (source, english))| {
                SentenceRecord::new(SentenceId::new(index), source, english)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sentences })
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

    #[must_use]
    pub fn get(&self, id: SentenceId) -> Option<&SentenceRecord> {
        self.sentences.get(id.index())
    }

    #[must_use]
    pub fn window(&self, day: DayNumber, window_size: NonZeroUsize) -> DayWindow {
        DayWindow::from_pool(&self.sentences, day, window_size)
    }

    #[must_use]
    pub fn day_count(&self, window_size: NonZeroUsize) -> usize {
        day_count(self.len(), window_size)
    }
}
