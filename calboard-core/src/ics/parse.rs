//! Building `Event`s from VEVENT blocks.

use chrono::Duration;
use chrono_tz::Tz;

use super::escape::unescape;
use super::unfold::{RawBlock, split_blocks, unfold};
use crate::event::{Event, UNTITLED};
use crate::instant::{is_all_day, resolve_instant};

/// Parse every VEVENT in `content` into an `Event`, in source order.
///
/// Date-only and floating times are read in `default_tz` unless the property
/// names its own zone.
pub fn parse_events(content: &str, default_tz: Tz) -> Vec<Event> {
    let unfolded = unfold(content);
    let events: Vec<Event> = split_blocks(&unfolded)
        .iter()
        .map(|block| build_event(block, default_tz))
        .collect();

    log::debug!("Parsed {} events", events.len());
    events
}

/// Build one event from a block. Missing or malformed fields fall back to defaults.
pub fn build_event(block: &RawBlock, default_tz: Tz) -> Event {
    let title = block
        .value("SUMMARY")
        .map(unescape)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    let location = block.value("LOCATION").map(unescape).unwrap_or_default();
    let description = block.value("DESCRIPTION").map(unescape).unwrap_or_default();
    let url = block
        .value("URL")
        .map(unescape)
        .filter(|u| !u.is_empty());
    let uid = block
        .value("UID")
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    let dtstart = block.property("DTSTART");
    let start = resolve_instant(dtstart.as_ref(), default_tz);
    let all_day = dtstart.as_ref().is_some_and(is_all_day);

    // DTEND wins; DURATION is only consulted when there is no usable DTEND.
    // An end past chrono's range is dropped rather than failing the event.
    let end = resolve_instant(block.property("DTEND").as_ref(), default_tz).or_else(|| {
        let duration = parse_duration(block.value("DURATION")?)?;
        start?.checked_add_signed(duration)
    });

    let event = Event {
        uid,
        title,
        location,
        description,
        url,
        all_day,
        start,
        end,
    };

    if !event.is_schedulable() {
        log::debug!(
            "Event '{}' has no usable DTSTART and cannot be scheduled",
            event.title
        );
    }

    event
}

/// Parse a DURATION value such as `PT1H30M`, `P1D` or `-PT15M`.
fn parse_duration(value: &str) -> Option<Duration> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let duration = iso8601::duration(unsigned).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let duration = Duration::from_std(std_duration).ok()?;

    Some(if negative { -duration } else { duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::New_York;

    #[test]
    fn test_parse_full_event() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:choir-1@example.com\r\n\
SUMMARY:Choir Practice\\, Sanctuary\r\n\
LOCATION:Main Hall\r\n\
DESCRIPTION:Bring music\\nand water\r\n\
URL:https://example.com/events/choir\r\n\
DTSTART;TZID=America/New_York:20240704T093000\r\n\
DTEND;TZID=America/New_York:20240704T103000\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

        let events = parse_events(ics, New_York);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.uid.as_deref(), Some("choir-1@example.com"));
        assert_eq!(event.title, "Choir Practice, Sanctuary");
        assert_eq!(event.location, "Main Hall");
        assert_eq!(event.description, "Bring music\nand water");
        assert_eq!(event.url.as_deref(), Some("https://example.com/events/choir"));
        assert!(!event.all_day);
        assert_eq!(
            event.start,
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 13, 30, 0).unwrap())
        );
        assert_eq!(
            event.end,
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let ics = "BEGIN:VEVENT\nSUMMARY:   \nDTSTART:garbage\nEND:VEVENT";

        let event = &parse_events(ics, New_York)[0];

        assert_eq!(event.title, UNTITLED);
        assert_eq!(event.location, "");
        assert_eq!(event.description, "");
        assert_eq!(event.uid, None);
        assert_eq!(event.url, None);
        assert_eq!(event.start, None);
        assert_eq!(event.end, None);
        assert!(!event.is_schedulable());
    }

    #[test]
    fn test_all_day_from_value_date() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Picnic\nDTSTART;VALUE=DATE:20240704\nDTEND;VALUE=DATE:20240705\nEND:VEVENT";

        let event = &parse_events(ics, New_York)[0];

        assert!(event.all_day);
        assert_eq!(
            event.start,
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 4, 0, 0).unwrap())
        );
        assert_eq!(
            event.end,
            Some(Utc.with_ymd_and_hms(2024, 7, 5, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_end_from_duration_when_dtend_missing() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Talk\nDTSTART:20240704T150000Z\nDURATION:PT1H30M\nEND:VEVENT";

        let event = &parse_events(ics, New_York)[0];

        assert_eq!(
            event.end,
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 16, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_alarm_description_does_not_leak_into_event() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Dentist\nDTSTART:20240704T150000Z\nBEGIN:VALARM\nACTION:DISPLAY\nDESCRIPTION:Reminder\nTRIGGER:-PT15M\nEND:VALARM\nEND:VEVENT";

        let event = &parse_events(ics, New_York)[0];

        assert_eq!(event.description, "");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let ics = "BEGIN:VEVENT\nSUMMARY:A\nDTSTART:20240704\nEND:VEVENT\nBEGIN:VEVENT\nSUMMARY:B\nDTSTART:20240705T120000Z\nEND:VEVENT";

        assert_eq!(parse_events(ics, New_York), parse_events(ics, New_York));
    }

    #[test]
    fn test_out_of_range_duration_drops_only_the_end() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Forever\nDTSTART:20240704T150000Z\nDURATION:P99999999Y\nEND:VEVENT";

        let event = &parse_events(ics, New_York)[0];

        assert_eq!(event.title, "Forever");
        assert_eq!(
            event.start,
            Some(Utc.with_ymd_and_hms(2024, 7, 4, 15, 0, 0).unwrap())
        );
        assert_eq!(event.end, None);
    }

    #[test]
    fn test_parse_duration_signs() {
        assert_eq!(parse_duration("P1D"), Some(Duration::days(1)));
        assert_eq!(parse_duration("-PT15M"), Some(Duration::minutes(-15)));
        assert_eq!(parse_duration("later"), None);
    }
}
