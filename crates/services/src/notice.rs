use daily_core::model::ProgressError;

use crate::error::{ProgressServiceError, SpeechError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A dismissible, user-facing message for a recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&SpeechError> for Notice {
    fn from(_: &SpeechError) -> Self {
        Notice::error(
            "Speech Error",
            "Text-to-speech is not available on this device.",
        )
    }
}

impl From<&ProgressServiceError> for Notice {
    fn from(err: &ProgressServiceError) -> Self {
        match err {
            ProgressServiceError::Progress(ProgressError::NotCompleted(_)) => Notice::warning(
                "Not completed yet",
                "Mark this sentence as completed before marking it mastered.",
            ),
            ProgressServiceError::Progress(ProgressError::ManualToggleUnavailable { .. }) => {
                Notice::warning(
                    "Not available",
                    "Progress here follows your views; tap Know It instead.",
                )
            }
            _ => Notice::error("Progress Error", "Your progress could not be updated."),
        }
    }
}
