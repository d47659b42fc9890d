//! Terminal rendering for calboard-core types.
//!
//! Extension traits that add colored output to the core types using owo_colors.

use calboard_core::{DayGroup, Event};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

/// Width of the time column, wide enough for "10:30 AM – 11:30 AM".
const TIME_WIDTH: usize = 19;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, tz: Tz) -> String;
}

impl Render for Event {
    fn render(&self, tz: Tz) -> String {
        let time = format!("{:>width$}", self.time_label(tz), width = TIME_WIDTH);
        let mut line = format!("  {} {}", time, self.title);
        if !self.location.is_empty() {
            line.push_str(&format!(" {}", format!("@ {}", self.location).dimmed()));
        }
        line
    }
}

impl Render for DayGroup {
    fn render(&self, tz: Tz) -> String {
        if self.is_empty_sentinel() {
            return self.label.dimmed().to_string();
        }

        let mut lines = vec![self.label.bold().to_string()];
        lines.extend(self.events.iter().map(|e| e.render(tz)));
        lines.join("\n")
    }
}
