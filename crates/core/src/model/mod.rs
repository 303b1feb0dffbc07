mod ids;
mod mastery;
mod progress;
mod sentence;

pub use ids::{DayError, DayNumber, ParseIdError, SentenceId};
pub use mastery::{
    AutoMasteryPolicy, ManualMasteryPolicy, MasteryMode, MasteryPolicy, ParseMasteryModeError,
};
pub use progress::{ProgressEntry, ProgressError};
pub use sentence::{SentenceError, SentenceRecord};
