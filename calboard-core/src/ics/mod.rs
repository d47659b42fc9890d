//! Calendar text parsing.
//!
//! This module turns the raw text of an iCalendar export into `Event`s:
//! unfolding continuation lines, splitting VEVENT blocks, reading properties
//! and decoding escaped text.

mod escape;
mod parse;
mod property;
mod unfold;

pub use escape::unescape;
pub use parse::{build_event, parse_events};
pub use property::PropertyValue;
pub use unfold::{RawBlock, split_blocks, unfold};
