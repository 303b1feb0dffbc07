use daily_core::model::DayNumber;
use daily_core::stats::ProgressStats;

/// Header numbers for one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayHeaderVm {
    pub day: DayNumber,
    pub subtitle: String,
    pub learned_label: String,
    pub mastered_label: String,
    pub percent: u8,
    pub remaining: u32,
    pub done: bool,
}

impl DayHeaderVm {
    #[must_use]
    pub fn new(day: DayNumber, phrase_count: usize, stats: ProgressStats) -> Self {
        Self {
            day,
            subtitle: format!("Day {day} • {phrase_count} New Phrases"),
            learned_label: format!("{}/{}", stats.completed, stats.total),
            mastered_label: format!("🌳 {}", stats.mastered),
            percent: stats.percent,
            remaining: stats.remaining,
            done: stats.is_done(),
        }
    }

    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {}%", self.percent)
    }
}
