use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::SentenceId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SentenceError {
    #[error("sentence {0} has an empty source text")]
    EmptySource(SentenceId),

    #[error("sentence {0} has an empty English text")]
    EmptyEnglish(SentenceId),
}

//
// ─── SENTENCE ──────────────────────────────────────────────────────────────────
//

/// A bilingual sentence pair from the static pool.
///
/// The id is the record's position in the pool and never changes for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    id: SentenceId,
    source_text: String,
    english_text: String,
}

impl SentenceRecord {
    /// Build a record, trimming both texts.
    ///
    /// # Errors
    ///
    /// Returns `SentenceError` when either text is blank.
    pub fn new(
        id: SentenceId,
        source_text: impl Into<String>,
        english_text: impl Into<String>,
    ) -> Result<Self, SentenceError> {
        let source_text = source_text.into().trim().to_owned();
        let english_text = english_text.into().trim().to_owned();

        if source_text.is_empty() {
            return Err(SentenceError::EmptySource(id));
        }
        if english_text.is_empty() {
            return Err(SentenceError::EmptyEnglish(id));
        }

        Ok(Self {
            id,
            source_text,
            english_text,
        })
    }

    #[must_use]
    pub fn id(&self) -> SentenceId {
        self.id
    }

    /// Text in the language being learned.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    #[must_use]
    pub fn english_text(&self) -> &str {
        &self.english_text
    }
}
