use daily_core::model::{DayNumber, SentenceId};
use daily_core::window::DayWindow;
use services::{AdPlacement, DayService, LanguageTag, ProgressService, StatsService};

use crate::views::ViewError;
use crate::vm::card_vm::{DailyItem, layout_daily_items, map_sentence_cards};
use crate::vm::stats_vm::DayHeaderVm;

/// Everything the daily list needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyVm {
    pub window: DayWindow,
    pub header: DayHeaderVm,
    pub items: Vec<DailyItem>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl DailyVm {
    #[must_use]
    pub fn day(&self) -> DayNumber {
        self.window.day()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// What the learner can do on the daily screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DailyIntent {
    KnowIt(SentenceId),
    ToggleCompleted(SentenceId),
    ToggleMastered(SentenceId),
    Speak(SentenceId, LanguageTag),
    PreviousDay,
    NextDay,
    RequestReset,
    ConfirmReset,
    CancelReset,
    DismissNotice,
}

/// Load the window, stored progress and stats for `day`.
///
/// # Errors
///
/// Returns `ViewError::Unknown` if progress cannot be read.
pub async fn load_daily(
    days: &DayService,
    progress: &ProgressService,
    stats: &StatsService,
    placement: AdPlacement,
    day: DayNumber,
    can_navigate: bool,
) -> Result<DailyVm, ViewError> {
    let window = days.window(day);
    let entries = progress
        .entries_for(&window)
        .await
        .map_err(|_| ViewError::Unknown)?;
    let day_stats = stats
        .stats_for(&window)
        .await
        .map_err(|_| ViewError::Unknown)?;

    let header = DayHeaderVm::new(day, window.len(), day_stats);
    let items = layout_daily_items(map_sentence_cards(&window, &entries), placement);

    Ok(DailyVm {
        header,
        items,
        has_previous: can_navigate && day.previous().is_some(),
        has_next: can_navigate && days.has_day(day.next()),
        window,
    })
}
