use async_trait::async_trait;
use daily_core::model::{ProgressEntry, SentenceId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::pool::SentencePool;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),
}

/// Repository contract for per-sentence progress.
///
/// Absent ids are simply missing; callers decide what the default looks like.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the entry for a sentence, if any interaction was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_progress(&self, id: SentenceId) -> Result<Option<ProgressEntry>, StorageError>;

    /// Insert or replace the entry for its sentence.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn upsert_progress(&self, entry: &ProgressEntry) -> Result<(), StorageError>;

    /// Fetch stored entries for the given ids, ordered like `ids`. Missing ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_progress(&self, ids: &[SentenceId]) -> Result<Vec<ProgressEntry>, StorageError>;

    /// Remove entries for the given ids and return how many existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_progress(&self, ids: &[SentenceId]) -> Result<usize, StorageError>;

    /// Remove every entry and return how many existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_all(&self) -> Result<usize, StorageError>;
}

/// Session-scoped progress map. Dropping it forgets everything.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<SentenceId, ProgressEntry>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SentenceId, ProgressEntry>>, StorageError> {
        self.progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(&self, id: SentenceId) -> Result<Option<ProgressEntry>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.get(&id).cloned())
    }

    async fn upsert_progress(&self, entry: &ProgressEntry) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.insert(entry.sentence_id(), entry.clone());
        Ok(())
    }

    async fn list_progress(&self, ids: &[SentenceId]) -> Result<Vec<ProgressEntry>, StorageError> {
        let guard = self.lock()?;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }

    async fn clear_progress(&self, ids: &[SentenceId]) -> Result<usize, StorageError> {
        let mut guard = self.lock()?;
        Ok(ids.iter().filter(|id| guard.remove(*id).is_some()).count())
    }

    async fn clear_all(&self) -> Result<usize, StorageError> {
        let mut guard = self.lock()?;
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

/// The sentence pool plus the progress backend, shared by services.
#[derive(Clone)]
pub struct Storage {
    pub sentences: Arc<SentencePool>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(sentences: SentencePool) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self {
            sentences: Arc::new(sentences),
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daily_core::model::{AutoMasteryPolicy, MasteryPolicy};
    use daily_core::time::fixed_now;

    fn viewed(id: usize) -> ProgressEntry {
        AutoMasteryPolicy.record_view(&ProgressEntry::new(SentenceId::new(id)), fixed_now())
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_progress(SentenceId::new(1)).await.unwrap().is_none());

        let entry = viewed(1);
        repo.upsert_progress(&entry).await.unwrap();
        let fetched = repo.get_progress(SentenceId::new(1)).await.unwrap();
        assert_eq!(fetched, Some(entry));
    }

    #[tokio::test]
    async fn list_skips_missing_ids_and_keeps_order() {
        let repo = InMemoryRepository::new();
        repo.upsert_progress(&viewed(3)).await.unwrap();
        repo.upsert_progress(&viewed(1)).await.unwrap();

        let ids = [SentenceId::new(3), SentenceId::new(2), SentenceId::new(1)];
        let listed = repo.list_progress(&ids).await.unwrap();
        let listed_ids: Vec<_> = listed.iter().map(ProgressEntry::sentence_id).collect();
        assert_eq!(listed_ids, vec![SentenceId::new(3), SentenceId::new(1)]);
    }

    #[tokio::test]
    async fn clear_progress_only_touches_given_ids() {
        let repo = InMemoryRepository::new();
        for id in 0..4 {
            repo.upsert_progress(&viewed(id)).await.unwrap();
        }

        let removed = repo
            .clear_progress(&[SentenceId::new(0), SentenceId::new(1), SentenceId::new(9)])
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(repo.get_progress(SentenceId::new(0)).await.unwrap().is_none());
        assert!(repo.get_progress(SentenceId::new(2)).await.unwrap().is_some());

        assert_eq!(repo.clear_all().await.unwrap(), 2);
        assert_eq!(repo.clear_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn poisoned_lock_surfaces_as_connection_error() {
        let repo = InMemoryRepository::new();
        let shared = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.progress.lock().unwrap();
            panic!("poison the map");
        })
        .join();

        let err = repo.get_progress(SentenceId::new(0)).await.unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)));
        assert!(repo.upsert_progress(&viewed(0)).await.is_err());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.upsert_progress(&viewed(5)).await.unwrap();
        assert!(other.get_progress(SentenceId::new(5)).await.unwrap().is_some());
    }
}
