//! Core pipeline for calboard.
//!
//! Turns the raw text of a calendar export into a time-ordered, windowed list
//! of events grouped by calendar day:
//! - `ics` unfolds, splits and parses the text into `Event`s
//! - `instant` resolves DTSTART/DTEND values into UTC instants
//! - `date_range` keeps the forward window and orders it
//! - `agenda` groups the result into `DayGroup`s for display
//!
//! Fetching the text and rendering the groups are the caller's business.

pub mod agenda;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod ics;
pub mod instant;

pub use agenda::{DayGroup, group_by_day};
pub use config::{AgendaConfig, CalboardConfig};
pub use error::{CalboardError, CalboardResult};
pub use event::Event;

use chrono::{DateTime, Utc};

use crate::date_range::DateRange;

/// Run the whole pipeline: text → events → upcoming events → day groups.
///
/// Pure with respect to its inputs; `now` is the only notion of time used.
pub fn build_agenda(text: &str, config: &AgendaConfig, now: DateTime<Utc>) -> Vec<DayGroup> {
    let events = ics::parse_events(text, config.timezone);
    let range = DateRange::upcoming(now, config.window_days);
    let upcoming = range.select(&events, config.max_events);

    log::info!(
        "{} of {} events fall within {} days of {}",
        upcoming.len(),
        events.len(),
        config.window_days,
        now.to_rfc3339()
    );

    group_by_day(&upcoming, config.timezone)
}
