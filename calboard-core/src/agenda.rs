//! Grouping upcoming events by calendar day.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Day label format, e.g. "Thursday, July 4".
pub const DAY_LABEL_FORMAT: &str = "%A, %B %-d";

/// Day label format for days outside the agenda's first year, e.g. "Thursday, July 4, 2030".
pub const DAY_LABEL_WITH_YEAR_FORMAT: &str = "%A, %B %-d, %Y";

/// Label of the group returned when there is nothing to show.
pub const NO_EVENTS_LABEL: &str = "No upcoming events";

/// Events sharing one calendar day in the display timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    pub label: String,
    pub events: Vec<Event>,
}

impl DayGroup {
    /// The single group standing in for an empty agenda.
    pub fn no_events() -> Self {
        DayGroup {
            label: NO_EVENTS_LABEL.to_string(),
            events: Vec::new(),
        }
    }

    /// True for the "no events" placeholder. Real day groups are never empty.
    pub fn is_empty_sentinel(&self) -> bool {
        self.events.is_empty()
    }
}

/// Bucket events by their start day in `tz`.
///
/// Buckets are keyed on the calendar date, so the same weekday and month-day
/// in different years stay apart. Events keep their encounter order inside a
/// bucket; buckets are ordered by their earliest start. Days outside the
/// first bucket's year carry the year in their label, which keeps labels
/// unique. An empty input yields `[DayGroup::no_events()]`.
pub fn group_by_day(events: &[Event], tz: Tz) -> Vec<DayGroup> {
    let mut buckets: Vec<(NaiveDate, Vec<Event>)> = Vec::new();
    let mut index_by_day: HashMap<NaiveDate, usize> = HashMap::new();

    for event in events {
        let Some(start) = event.start else {
            log::debug!("Not grouping '{}': no start", event.title);
            continue;
        };

        let day = start.with_timezone(&tz).date_naive();
        match index_by_day.get(&day) {
            Some(&i) => buckets[i].1.push(event.clone()),
            None => {
                index_by_day.insert(day, buckets.len());
                buckets.push((day, vec![event.clone()]));
            }
        }
    }

    buckets.sort_by_key(|(_, events)| events.iter().filter_map(|e| e.start).min());

    let Some(first_year) = buckets.first().map(|(day, _)| day.year()) else {
        return vec![DayGroup::no_events()];
    };

    buckets
        .into_iter()
        .map(|(day, events)| {
            let format = if day.year() == first_year {
                DAY_LABEL_FORMAT
            } else {
                DAY_LABEL_WITH_YEAR_FORMAT
            };
            DayGroup {
                label: day.format(format).to_string(),
                events,
            }
        })
        .collect()
}
