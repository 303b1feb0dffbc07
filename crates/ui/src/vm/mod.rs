mod card_vm;
mod daily_vm;
mod progress_vm;
mod stats_vm;
mod time_fmt;

pub use card_vm::{DailyItem, SentenceCardVm, layout_daily_items, map_sentence_cards, viewed_label};
pub use daily_vm::{DailyIntent, DailyVm, load_daily};
pub use progress_vm::{DayRowVm, ProgressOverviewVm, load_progress_overview};
pub use stats_vm::DayHeaderVm;
