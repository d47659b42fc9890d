//! Forward-looking window for selecting upcoming events.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

/// Half-open range of instants `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// The `days`-day window starting at `now`.
    ///
    /// A window reaching past the last representable instant is clamped to it;
    /// a non-positive `days` gives an empty range.
    pub fn upcoming(now: DateTime<Utc>, days: i64) -> Self {
        let to = if days <= 0 {
            now
        } else {
            Duration::try_days(days)
                .and_then(|window| now.checked_add_signed(window))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        };

        DateRange { from: now, to }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    /// Events starting inside the range, earliest first, at most `limit` of them.
    ///
    /// Events without a start are left out. Ties keep their input order.
    pub fn select(&self, events: &[Event], limit: usize) -> Vec<Event> {
        let mut selected: Vec<Event> = events
            .iter()
            .filter(|event| match event.start {
                Some(start) => self.contains(start),
                None => false,
            })
            .cloned()
            .collect();

        log::debug!(
            "{} of {} events start between {} and {}",
            selected.len(),
            events.len(),
            self.from.to_rfc3339(),
            self.to.to_rfc3339()
        );

        selected.sort_by_key(|event| event.start);
        selected.truncate(limit);
        selected
    }
}
