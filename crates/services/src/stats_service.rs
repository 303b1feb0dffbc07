use std::sync::Arc;

use daily_core::model::SentenceId;
use daily_core::stats::{DailyTarget, ProgressStats, compute_stats};
use daily_core::window::DayWindow;
use storage::ProgressRepository;

use crate::error::ProgressServiceError;

/// Derives daily counts from stored progress.
#[derive(Clone)]
pub struct StatsService {
    progress: Arc<dyn ProgressRepository>,
    target: DailyTarget,
}

impl StatsService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>, target: DailyTarget) -> Self {
        Self { progress, target }
    }

    #[must_use]
    pub fn target(&self) -> DailyTarget {
        self.target
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn stats_for(&self, window: &DayWindow) -> Result<ProgressStats, ProgressServiceError> {
        let ids: Vec<SentenceId> = window.ids().collect();
        let entries = self.progress.list_progress(&ids).await?;
        Ok(compute_stats(&entries, window, self.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use daily_core::model::{AutoMasteryPolicy, DayNumber, MasteryPolicy, ProgressEntry};
    use daily_core::time::fixed_now;
    use daily_core::window::DEFAULT_WINDOW_SIZE;
    use storage::{InMemoryRepository, SentencePool};

    #[tokio::test]
    async fn stats_reflect_stored_progress() {
        let repo = InMemoryRepository::new();
        let pool = SentencePool::from_pairs((0..50).map(|i| (format!("వా {i}"), format!("s {i}"))))
            .unwrap();
        let window = pool.window(DayNumber::FIRST, DEFAULT_WINDOW_SIZE);

        for id in 0..17 {
            let entry = AutoMasteryPolicy
                .record_view(&ProgressEntry::new(SentenceId::new(id)), fixed_now());
            repo.upsert_progress(&entry).await.unwrap();
        }

        let stats = StatsService::new(Arc::new(repo), DailyTarget::WindowLength)
            .stats_for(&window)
            .await
            .unwrap();
        assert_eq!(stats.total, 50);
        assert_eq!(stats.completed, 17);
        assert_eq!(stats.mastered, 0);
        assert_eq!(stats.remaining, 33);
        assert_eq!(stats.percent, 34);
    }
}
