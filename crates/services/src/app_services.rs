use std::sync::Arc;

use daily_core::model::MasteryMode;
use daily_core::window::DaySelector;
use storage::{SentencePool, Storage};

use crate::ads::{AdNetwork, AdPlacement, AdService, TestAdNetwork};
use crate::config::{AppConfig, SpeechBackend};
use crate::day_service::DayService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::speech::{NoSpeech, SpeechService, SpeechSynthesizer, SystemSpeech};
use crate::stats_service::StatsService;
use crate::Clock;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    day_selector: DaySelector,
    ad_placement: AdPlacement,
    days: Arc<DayService>,
    progress: Arc<ProgressService>,
    stats: Arc<StatsService>,
    speech: Arc<SpeechService>,
    ads: Arc<AdService>,
}

impl AppServices {
    /// Build services over the bundled sentence pool with in-memory progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Pool` if the bundled sentences cannot be loaded.
    pub fn bundled(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let pool = SentencePool::bundled()?;
        log::info!(
            "loaded {} sentences ({} days of {})",
            pool.len(),
            pool.day_count(config.window_size),
            config.window_size
        );
        let synthesizer: Arc<dyn SpeechSynthesizer> = match config.speech {
            SpeechBackend::System => Arc::new(SystemSpeech),
            SpeechBackend::Off => Arc::new(NoSpeech),
        };
        let ads = AdService::new(Arc::new(TestAdNetwork), config.ads.clone());
        Ok(Self::with_parts(
            config,
            clock,
            Storage::in_memory(pool),
            synthesizer,
            ads,
        ))
    }

    /// Build services over `pool` with speech off and the test ad network.
    #[must_use]
    pub fn in_memory(config: &AppConfig, clock: Clock, pool: SentencePool) -> Self {
        let ads = AdService::new(Arc::new(TestAdNetwork), config.ads.clone());
        Self::with_parts(
            config,
            clock,
            Storage::in_memory(pool),
            Arc::new(NoSpeech),
            ads,
        )
    }

    #[must_use]
    pub fn with_parts(
        config: &AppConfig,
        clock: Clock,
        storage: Storage,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        ads: AdService,
    ) -> Self {
        let days = Arc::new(DayService::new(
            Arc::clone(&storage.sentences),
            config.window_size,
        ));
        let progress = Arc::new(ProgressService::new(
            clock,
            config.mastery.policy(),
            Arc::clone(&storage.progress),
        ));
        let stats = Arc::new(StatsService::new(
            Arc::clone(&storage.progress),
            config.daily_target,
        ));
        let speech = Arc::new(SpeechService::new(synthesizer, config.speech_settings));

        Self {
            day_selector: config.day_selector(),
            ad_placement: config.ad_placement,
            days,
            progress,
            stats,
            speech,
            ads: Arc::new(ads),
        }
    }

    /// Like `with_parts`, with a caller-supplied ad network.
    #[must_use]
    pub fn with_ad_network(
        config: &AppConfig,
        clock: Clock,
        storage: Storage,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        network: Arc<dyn AdNetwork>,
    ) -> Self {
        let ads = AdService::new(network, config.ads.clone());
        Self::with_parts(config, clock, storage, synthesizer, ads)
    }

    #[must_use]
    pub fn day_selector(&self) -> DaySelector {
        self.day_selector
    }

    #[must_use]
    pub fn mastery_mode(&self) -> MasteryMode {
        self.progress.mode()
    }

    #[must_use]
    pub fn ad_placement(&self) -> AdPlacement {
        self.ad_placement
    }

    #[must_use]
    pub fn days(&self) -> Arc<DayService> {
        Arc::clone(&self.days)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn speech(&self) -> Arc<SpeechService> {
        Arc::clone(&self.speech)
    }

    #[must_use]
    pub fn ads(&self) -> Arc<AdService> {
        Arc::clone(&self.ads)
    }
}
