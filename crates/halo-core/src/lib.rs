//! Core types shared by the halo clock crates.

mod color;
mod palette;

pub use color::{ParseRgbError, Rgb};
pub use palette::Palette;

use serde::{Deserialize, Serialize};

/// Time format for the hours ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    /// Twelve numerals labelled 1 through 12.
    #[default]
    TwelveHour,
    /// Twenty-four numerals labelled 0 through 23.
    TwentyFourHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(&self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }

    /// Number of numerals on the hours ring.
    pub fn hour_units(self) -> usize {
        match self {
            TimeFormat::TwelveHour => 12,
            TimeFormat::TwentyFourHour => 24,
        }
    }
}

/// One of the three concentric numeral tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingKind {
    Seconds,
    Minutes,
    Hours,
}

impl RingKind {
    /// All rings, outermost first. This is also the update order.
    pub const ALL: [RingKind; 3] = [RingKind::Seconds, RingKind::Minutes, RingKind::Hours];

    /// Number of numerals on this ring.
    pub fn units(self, format: TimeFormat) -> usize {
        match self {
            RingKind::Seconds | RingKind::Minutes => 60,
            RingKind::Hours => format.hour_units(),
        }
    }

    /// Human readable name, used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            RingKind::Seconds => "seconds",
            RingKind::Minutes => "minutes",
            RingKind::Hours => "hours",
        }
    }
}

impl std::fmt::Display for RingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format_toggle() {
        assert_eq!(TimeFormat::TwelveHour.toggle(), TimeFormat::TwentyFourHour);
        assert_eq!(TimeFormat::TwentyFourHour.toggle(), TimeFormat::TwelveHour);
    }

    #[test]
    fn test_ring_units() {
        assert_eq!(RingKind::Seconds.units(TimeFormat::TwelveHour), 60);
        assert_eq!(RingKind::Minutes.units(TimeFormat::TwentyFourHour), 60);
        assert_eq!(RingKind::Hours.units(TimeFormat::TwelveHour), 12);
        assert_eq!(RingKind::Hours.units(TimeFormat::TwentyFourHour), 24);
    }
}
