mod daily;
mod progress;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use daily::{DailyView, NoticeBanner};
pub use progress::ProgressView;
pub use state::{ViewError, ViewState, view_state_from_resource};
