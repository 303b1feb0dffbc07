use chrono::{DateTime, Utc};

#[must_use]
pub fn format_last_viewed(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}
