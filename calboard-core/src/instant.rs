//! Resolution of DTSTART/DTEND values into UTC instants.
//!
//! Calendar exports mix three shapes of time value:
//! - `20240704` a date with no time of day
//! - `20240704T093000Z` a UTC date-time
//! - `20240704T093000` a wall-clock time in the `TZID` zone (or the default zone)
//!
//! Anything else goes through a lenient fallback parser. A value that cannot
//! be understood resolves to `None` rather than an error.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::ics::PropertyValue;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Wall-clock layouts accepted by the fallback parser, read in the event's zone.
const FALLBACK_LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// The shape of a raw time value, decided once before any zone arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTime {
    DateOnly(NaiveDate),
    LocalDateTime(NaiveDateTime),
    UtcDateTime(NaiveDateTime),
    Unrecognized(String),
}

impl RawTime {
    pub fn classify(value: &str) -> RawTime {
        let value = value.trim();

        let parsed = if !value.is_ascii() {
            None
        } else if value.len() == 8 && is_digits(value) {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .map(RawTime::DateOnly)
        } else if value.len() == 15 && is_basic_date_time(value) {
            NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
                .ok()
                .map(RawTime::LocalDateTime)
        } else if value.len() == 16 && value.ends_with('Z') && is_basic_date_time(&value[..15]) {
            NaiveDateTime::parse_from_str(&value[..15], DATE_TIME_FORMAT)
                .ok()
                .map(RawTime::UtcDateTime)
        } else {
            None
        };

        parsed.unwrap_or_else(|| RawTime::Unrecognized(value.to_string()))
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, RawTime::DateOnly(_))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYYMMDDTHHMMSS`
fn is_basic_date_time(s: &str) -> bool {
    s.len() == 15 && s.as_bytes()[8] == b'T' && is_digits(&s[..8]) && is_digits(&s[9..])
}

/// Resolve a DTSTART/DTEND property to a UTC instant.
///
/// Date-only and wall-clock values are read in the property's `TZID` zone,
/// falling back to `default_tz` when there is none or it is unknown.
pub fn resolve_instant(prop: Option<&PropertyValue>, default_tz: Tz) -> Option<DateTime<Utc>> {
    let prop = prop?;

    match RawTime::classify(&prop.value) {
        RawTime::DateOnly(date) => Some(wall_clock_to_utc(
            date.and_time(NaiveTime::MIN),
            zone_for(prop, default_tz),
        )),
        RawTime::UtcDateTime(naive) => Some(naive.and_utc()),
        RawTime::LocalDateTime(naive) => Some(wall_clock_to_utc(naive, zone_for(prop, default_tz))),
        RawTime::Unrecognized(text) => parse_fallback(&text, zone_for(prop, default_tz)),
    }
}

/// Whether a DTSTART property describes a whole day rather than a moment.
pub fn is_all_day(prop: &PropertyValue) -> bool {
    RawTime::classify(&prop.value).is_date_only()
        || prop
            .param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
}

/// Look up an IANA zone name, tolerating quotes and a leading `/`.
pub fn lookup_timezone(name: &str) -> Option<Tz> {
    let name = name.trim().trim_matches('"').trim_start_matches('/');
    if name.is_empty() {
        return None;
    }
    name.parse::<Tz>().ok()
}

fn zone_for(prop: &PropertyValue, default_tz: Tz) -> Tz {
    let Some(tzid) = prop.param("TZID") else {
        return default_tz;
    };

    lookup_timezone(tzid).unwrap_or_else(|| {
        log::warn!(
            "Unknown TZID '{}', reading '{}' in {} instead",
            tzid,
            prop.value,
            default_tz.name()
        );
        default_tz
    })
}

/// Offset of `tz` from UTC around the wall-clock time `wall`.
///
/// Reads `wall` as if it were UTC, converts that instant through the zone's
/// rules and takes the difference between the two wall clocks.
pub fn utc_offset_at(tz: Tz, wall: NaiveDateTime) -> Duration {
    tz.from_utc_datetime(&wall).naive_local() - wall
}

/// Convert a wall-clock time in `tz` to the UTC instant it names.
///
/// Ambiguous times (the repeated hour when clocks go back) take the earlier
/// instant. Times inside a spring-forward gap have no exact match and take
/// the offset from `utc_offset_at`.
pub fn wall_clock_to_utc(wall: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => (wall - utc_offset_at(tz, wall)).and_utc(),
    }
}

fn parse_fallback(text: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    let local = FALLBACK_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        });

    match local {
        Some(naive) => Some(wall_clock_to_utc(naive, tz)),
        None => {
            log::debug!("Could not parse time value '{}'", text);
            None
        }
    }
}
