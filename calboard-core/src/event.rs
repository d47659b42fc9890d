//! The normalized event handed to renderers.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Title used when an event has no usable SUMMARY.
pub const UNTITLED: &str = "(No title)";

/// A calendar event with its times resolved to UTC.
///
/// Text fields are already unescaped. `end` may precede `start` when the
/// source is malformed; nothing here corrects that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub uid: Option<String>,
    pub title: String,
    pub location: String,
    pub description: String,
    /// Link to the event page, if the source has one.
    pub url: Option<String>,
    /// The start carries no time of day (DTSTART;VALUE=DATE or a bare date).
    pub all_day: bool,
    /// `None` means the start could not be resolved; such events are unschedulable.
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Event {
    /// Whether this event has a start instant and can be placed on the agenda.
    pub fn is_schedulable(&self) -> bool {
        self.start.is_some()
    }

    /// Human-readable time of the event in `tz`, e.g. "9:30 AM – 10:30 AM" or "All day".
    ///
    /// The end time is only shown when it falls on the same display day as the start.
    pub fn time_label(&self, tz: Tz) -> String {
        if self.all_day {
            return "All day".to_string();
        }

        let Some(start) = self.start.map(|s| s.with_timezone(&tz)) else {
            return String::new();
        };

        let start_label = start.format("%-I:%M %p").to_string();
        match self.end.map(|e| e.with_timezone(&tz)) {
            Some(end) if end > start && end.date_naive() == start.date_naive() => {
                format!("{} – {}", start_label, end.format("%-I:%M %p"))
            }
            _ => start_label,
        }
    }
}
