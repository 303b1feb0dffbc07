use std::collections::HashMap;

use daily_core::model::{ProgressEntry, SentenceId};
use daily_core::window::DayWindow;
use services::AdPlacement;

use crate::vm::time_fmt::format_last_viewed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentenceCardVm {
    pub id: SentenceId,
    pub number_label: String,
    pub source_text: String,
    pub english_text: String,

    pub view_count: u32,
    pub completed: bool,
    pub mastered: bool,
    pub viewed_label: Option<String>,
    pub last_viewed_str: Option<String>,
}

impl SentenceCardVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match (self.completed, self.mastered) {
            (_, true) => "sentence-card sentence-card--mastered",
            (true, false) => "sentence-card sentence-card--completed",
            (false, false) => "sentence-card",
        }
    }
}

#[must_use]
pub fn viewed_label(view_count: u32) -> Option<String> {
    match view_count {
        0 => None,
        1 => Some("Viewed 1 time".to_string()),
        n => Some(format!("Viewed {n} times")),
    }
}

/// Cards for `window`, merged with whatever progress is stored for them.
#[must_use]
pub fn map_sentence_cards(window: &DayWindow, entries: &[ProgressEntry]) -> Vec<SentenceCardVm> {
    let by_id: HashMap<SentenceId, &ProgressEntry> = entries
        .iter()
        .map(|entry| (entry.sentence_id(), entry))
        .collect();

    window
        .sentences()
        .iter()
        .map(|sentence| {
            let id = sentence.id();
            let entry = by_id.get(&id).copied();
            let view_count = entry.map_or(0, ProgressEntry::view_count);
            SentenceCardVm {
                id,
                number_label: format!("#{}", id.ordinal()),
                source_text: sentence.source_text().to_string(),
                english_text: sentence.english_text().to_string(),
                view_count,
                completed: entry.is_some_and(ProgressEntry::is_completed),
                mastered: entry.is_some_and(ProgressEntry::is_mastered),
                viewed_label: viewed_label(view_count),
                last_viewed_str: entry
                    .and_then(ProgressEntry::last_viewed)
                    .map(format_last_viewed),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DailyItem {
    Card(SentenceCardVm),
    Ad { slot: usize },
}

/// Interleave ad slots into the card list.
#[must_use]
pub fn layout_daily_items(cards: Vec<SentenceCardVm>, placement: AdPlacement) -> Vec<DailyItem> {
    let mut items = Vec::with_capacity(cards.len() + cards.len() / 5);
    for (index, card) in cards.into_iter().enumerate() {
        items.push(DailyItem::Card(card));
        if let Some(slot) = placement.slot_after(index) {
            items.push(DailyItem::Ad { slot });
        }
    }
    items
}
