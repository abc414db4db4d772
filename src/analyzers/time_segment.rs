//! Named windows of the day and their risk multipliers.

use chrono::{Local, Timelike};
use std::fmt;

/// A time-of-day window. Labels outside the known set map to
/// [`TimeSegment::Unspecified`], which leaves scores unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeSegment {
    Evening,
    Night,
    AfterMidnight,
    EarlyMorning,
    #[default]
    Unspecified,
}

impl TimeSegment {
    pub const ALL: [TimeSegment; 4] = [
        TimeSegment::Evening,
        TimeSegment::Night,
        TimeSegment::AfterMidnight,
        TimeSegment::EarlyMorning,
    ];

    /// Parses a display label (`"Night (9PM - 12AM)"`) or a short alias
    /// (`"night"`, `"after-midnight"`). Never fails.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();

        if let Some(segment) = Self::ALL.into_iter().find(|s| s.label() == trimmed) {
            return segment;
        }

        match trimmed.to_ascii_lowercase().replace('_', "-").as_str() {
            "evening" => TimeSegment::Evening,
            "night" => TimeSegment::Night,
            "after-midnight" => TimeSegment::AfterMidnight,
            "early-morning" => TimeSegment::EarlyMorning,
            _ => TimeSegment::Unspecified,
        }
    }

    /// Maps a 24h local hour onto the window containing it.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            17..=20 => TimeSegment::Evening,
            21..=23 => TimeSegment::Night,
            0..=4 => TimeSegment::AfterMidnight,
            5..=8 => TimeSegment::EarlyMorning,
            _ => TimeSegment::Unspecified,
        }
    }

    /// The window for the current local time.
    pub fn now() -> Self {
        Self::from_hour(Local::now().hour())
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSegment::Evening => "Evening (5PM - 9PM)",
            TimeSegment::Night => "Night (9PM - 12AM)",
            TimeSegment::AfterMidnight => "After Midnight (12AM - 5AM)",
            TimeSegment::EarlyMorning => "Early Morning (5AM - 9AM)",
            TimeSegment::Unspecified => "Unspecified",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            TimeSegment::Evening => 1.0,
            TimeSegment::Night => 0.9,
            TimeSegment::AfterMidnight => 0.7,
            TimeSegment::EarlyMorning => 0.85,
            TimeSegment::Unspecified => 1.0,
        }
    }
}

impl fmt::Display for TimeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
