use std::sync::Arc;

use daily_core::model::MasteryMode;
use daily_core::window::DaySelector;
use dioxus::prelude::*;
use services::{
    AdPlacement, AdService, AppServices, DayService, ProgressService, SpeechService, StatsService,
};

pub trait UiApp: Send + Sync {
    fn day_selector(&self) -> DaySelector;
    fn ad_placement(&self) -> AdPlacement;

    fn days(&self) -> Arc<DayService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn stats(&self) -> Arc<StatsService>;
    fn speech(&self) -> Arc<SpeechService>;
    fn ads(&self) -> Arc<AdService>;
}

impl UiApp for AppServices {
    fn day_selector(&self) -> DaySelector {
        AppServices::day_selector(self)
    }

    fn ad_placement(&self) -> AdPlacement {
        AppServices::ad_placement(self)
    }

    fn days(&self) -> Arc<DayService> {
        AppServices::days(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }

    fn stats(&self) -> Arc<StatsService> {
        AppServices::stats(self)
    }

    fn speech(&self) -> Arc<SpeechService> {
        AppServices::speech(self)
    }

    fn ads(&self) -> Arc<AdService> {
        AppServices::ads(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    initial_day: DaySelector,
    ad_placement: AdPlacement,

    days: Arc<DayService>,
    progress: Arc<ProgressService>,
    stats: Arc<StatsService>,
    speech: Arc<SpeechService>,
    ads: Arc<AdService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_day: app.day_selector(),
            ad_placement: app.ad_placement(),
            days: app.days(),
            progress: app.progress(),
            stats: app.stats(),
            speech: app.speech(),
            ads: app.ads(),
        }
    }

    /// The day selection the app was launched with.
    #[must_use]
    pub fn initial_day(&self) -> DaySelector {
        self.initial_day
    }

    #[must_use]
    pub fn ad_placement(&self) -> AdPlacement {
        self.ad_placement
    }

    #[must_use]
    pub fn mastery_mode(&self) -> MasteryMode {
        self.progress.mode()
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

/// Day currently on screen, shared by every route.
#[derive(Clone, Copy, PartialEq)]
pub struct SelectedDay(pub Signal<DaySelector>);

impl SelectedDay {
    /// Read the selection, subscribing the caller to changes.
    #[must_use]
    pub fn current(&self) -> DaySelector {
        *self.0.read()
    }
}

/// Provide `SelectedDay`, seeded from the launch configuration.
pub fn use_selected_day_provider(ctx: &AppContext) -> SelectedDay {
    let initial = ctx.initial_day();
    use_context_provider(|| SelectedDay(Signal::new(initial)))
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
