use std::sync::Arc;

use daily_core::model::{MasteryMode, MasteryPolicy, ProgressEntry, SentenceId};
use daily_core::window::DayWindow;
use storage::ProgressRepository;

use crate::error::ProgressServiceError;
use crate::Clock;

/// Tracks per-sentence learning state.
///
/// Every mutating call reads the current entry, computes the next one through
/// the mastery policy and stores it with a single write. A rejected
/// transition writes nothing.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    policy: Arc<dyn MasteryPolicy>,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        policy: Arc<dyn MasteryPolicy>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            policy,
            progress,
        }
    }

    #[must_use]
    pub fn mode(&self) -> MasteryMode {
        self.policy.mode()
    }

    /// Stored entry for `id`, or the zero entry if the sentence was never touched.
    ///
    /// Reading does not create an entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn get_or_default(&self, id: SentenceId) -> Result<ProgressEntry, ProgressServiceError> {
        let entry = self.progress.get_progress(id).await?;
        Ok(entry.unwrap_or_else(|| ProgressEntry::new(id)))
    }

    /// Count a view of `id` and return the updated entry.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn record_view(&self, id: SentenceId) -> Result<ProgressEntry, ProgressServiceError> {
        let current = self.get_or_default(id).await?;
        let next = self.policy.record_view(&current, self.clock.now());
        self.progress.upsert_progress(&next).await?;
        log::debug!(
            "sentence {id} viewed {} time(s), completed={}, mastered={}",
            next.view_count(),
            next.is_completed(),
            next.is_mastered()
        );
        Ok(next)
    }

    /// Flip the completed flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` when the policy has no manual toggles.
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn toggle_completed(&self, id: SentenceId) -> Result<bool, ProgressServiceError> {
        let current = self.get_or_default(id).await?;
        let next = self.policy.toggle_completed(&current, self.clock.now())?;
        self.progress.upsert_progress(&next).await?;
        log::debug!("sentence {id} completed={}", next.is_completed());
        Ok(next.is_completed())
    }

    /// Flip the mastered flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` with `ProgressError::NotCompleted`
    /// if the sentence is not completed, leaving it unchanged.
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn toggle_mastered(&self, id: SentenceId) -> Result<bool, ProgressServiceError> {
        let current = self.get_or_default(id).await?;
        let next = self.policy.toggle_mastered(&current).inspect_err(|err| {
            log::debug!("mastery toggle rejected for sentence {id}: {err}");
        })?;
        self.progress.upsert_progress(&next).await?;
        log::debug!("sentence {id} mastered={}", next.is_mastered());
        Ok(next.is_mastered())
    }

    /// Stored entries for the sentences of `window`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn entries_for(
        &self,
        window: &DayWindow,
    ) -> Result<Vec<ProgressEntry>, ProgressServiceError> {
        let ids: Vec<SentenceId> = window.ids().collect();
        Ok(self.progress.list_progress(&ids).await?)
    }

    /// Forget all progress for the sentences of `window`. Cannot be undone.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn reset_window(&self, window: &DayWindow) -> Result<usize, ProgressServiceError> {
        let ids: Vec<SentenceId> = window.ids().collect();
        let removed = self.progress.clear_progress(&ids).await?;
        log::info!("reset day {}: cleared {removed} progress entries", window.day());
        Ok(removed)
    }

    /// Forget all progress. Cannot be undone.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn reset_all(&self) -> Result<usize, ProgressServiceError> {
        let removed = self.progress.clear_all().await?;
        log::info!("reset all progress: cleared {removed} entries");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use daily_core::model::{AutoMasteryPolicy, DayNumber, ManualMasteryPolicy, ProgressError};
    use daily_core::time::{fixed_clock, fixed_now};
    use daily_core::window::DEFAULT_WINDOW_SIZE;
    use storage::{InMemoryRepository, SentencePool};

    fn service(policy: Arc<dyn MasteryPolicy>) -> (ProgressService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let service = ProgressService::new(fixed_clock(), policy, Arc::new(repo.clone()));
        (service, repo)
    }

    fn window() -> DayWindow {
        SentencePool::from_pairs([("ఒకటి", "one"), ("రెండు", "two"), ("మూడు", "three")])
            .unwrap()
            .window(DayNumber::FIRST, DEFAULT_WINDOW_SIZE)
    }

    #[tokio::test]
    async fn get_or_default_does_not_insert() {
        let (service, repo) = service(Arc::new(AutoMasteryPolicy));
        let entry = service.get_or_default(SentenceId::new(1)).await.unwrap();
        assert!(entry.is_untouched());
        assert!(repo.get_progress(SentenceId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn one_view_completes() {
        let (service, _) = service(Arc::new(AutoMasteryPolicy));
        let entry = service.record_view(SentenceId::new(0)).await.unwrap();
        assert_eq!(entry.view_count(), 1);
        assert!(entry.is_completed());
        assert!(!entry.is_mastered());
        assert_eq!(entry.last_viewed(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn two_views_master() {
        let (service, repo) = service(Arc::new(AutoMasteryPolicy));
        service.record_view(SentenceId::new(0)).await.unwrap();
        let entry = service.record_view(SentenceId::new(0)).await.unwrap();
        assert_eq!(entry.view_count(), 2);
        assert!(entry.is_completed());
        assert!(entry.is_mastered());

        let stored = repo.get_progress(SentenceId::new(0)).await.unwrap().unwrap();
        assert_eq!(stored, entry);
    }

    #[tokio::test]
    async fn mastery_toggle_before_completion_fails_without_writing() {
        let (service, repo) = service(Arc::new(ManualMasteryPolicy));
        let err = service.toggle_mastered(SentenceId::new(2)).await.unwrap_err();
        assert!(matches!(
            err,
            ProgressServiceError::Progress(ProgressError::NotCompleted(_))
        ));
        assert!(repo.get_progress(SentenceId::new(2)).await.unwrap().is_none());

        service.record_view(SentenceId::new(2)).await.unwrap();
        assert!(service.toggle_mastered(SentenceId::new(2)).await.is_err());
        let entry = service.get_or_default(SentenceId::new(2)).await.unwrap();
        assert!(!entry.is_mastered());
        assert_eq!(entry.view_count(), 1);
    }

    #[tokio::test]
    async fn manual_toggles_round_trip() {
        let (service, _) = service(Arc::new(ManualMasteryPolicy));
        let id = SentenceId::new(1);
        assert!(service.toggle_completed(id).await.unwrap());
        assert!(service.toggle_mastered(id).await.unwrap());
        assert!(!service.toggle_mastered(id).await.unwrap());
        assert!(service.toggle_mastered(id).await.unwrap());
        assert!(!service.toggle_completed(id).await.unwrap());

        let entry = service.get_or_default(id).await.unwrap();
        assert!(!entry.is_completed());
        assert!(!entry.is_mastered());
        assert_eq!(entry.view_count(), 1);
    }

    #[tokio::test]
    async fn auto_policy_rejects_toggles() {
        let (service, _) = service(Arc::new(AutoMasteryPolicy));
        let err = service.toggle_completed(SentenceId::new(0)).await.unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(service.mode(), MasteryMode::Auto);
    }

    #[tokio::test]
    async fn reset_window_clears_only_that_window() {
        let (service, repo) = service(Arc::new(AutoMasteryPolicy));
        let window = window();
        service.record_view(SentenceId::new(0)).await.unwrap();
        service.record_view(SentenceId::new(2)).await.unwrap();
        service.record_view(SentenceId::new(60)).await.unwrap();

        assert_eq!(service.entries_for(&window).await.unwrap().len(), 2);
        assert_eq!(service.reset_window(&window).await.unwrap(), 2);
        assert!(service.entries_for(&window).await.unwrap().is_empty());
        assert!(repo.get_progress(SentenceId::new(60)).await.unwrap().is_some());

        assert_eq!(service.reset_all().await.unwrap(), 1);
    }
}
