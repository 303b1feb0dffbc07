//! Shared error types for the services crate.

use thiserror::Error;

use daily_core::model::ProgressError;
use storage::{PoolError, StorageError};

/// Errors emitted by `ProgressService` and `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProgressServiceError {
    /// True when the learner asked for something the current state does not allow.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ProgressServiceError::Progress(
                ProgressError::NotCompleted(_) | ProgressError::ManualToggleUnavailable { .. }
            )
        )
    }
}

/// Errors emitted by speech synthesizers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("text-to-speech is unavailable: {0}")]
    PlaybackUnavailable(String),
}

/// Errors emitted by ad networks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AdError {
    #[error("ad network failed to initialize: {0}")]
    InitializationFailure(String),
    #[error("ads are not supported on {0}")]
    UnsupportedPlatform(&'static str),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
