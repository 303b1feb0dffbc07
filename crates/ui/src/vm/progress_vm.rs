use daily_core::model::DayNumber;
use services::{DayService, StatsService};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayRowVm {
    pub day: DayNumber,
    pub learned_label: String,
    pub mastered: u32,
    pub percent: u8,
    pub is_current: bool,
}

/// Totals across the whole sentence list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressOverviewVm {
    pub current_day: DayNumber,
    pub completed: u32,
    pub mastered: u32,
    pub rows: Vec<DayRowVm>,
}

/// # Errors
///
/// Returns `ViewError::Unknown` if progress cannot be read.
pub async fn load_progress_overview(
    days: &DayService,
    stats: &StatsService,
    current_day: DayNumber,
) -> Result<ProgressOverviewVm, ViewError> {
    let mut rows = Vec::new();
    let mut completed = 0_u32;
    let mut mastered = 0_u32;

    let mut day = DayNumber::FIRST;
    while days.has_day(day) {
        let day_stats = stats
            .stats_for(&days.window(day))
            .await
            .map_err(|_| ViewError::Unknown)?;
        completed = completed.saturating_add(day_stats.completed);
        mastered = mastered.saturating_add(day_stats.mastered);
        rows.push(DayRowVm {
            day,
            learned_label: format!("{}/{}", day_stats.completed, day_stats.total),
            mastered: day_stats.mastered,
            percent: day_stats.percent,
            is_current: day == current_day,
        });
        day = day.next();
    }

    Ok(ProgressOverviewVm {
        current_day,
        completed,
        mastered,
        rows,
    })
}
