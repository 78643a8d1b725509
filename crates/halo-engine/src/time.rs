//! Wall-clock sampling.

use chrono::Timelike;
use halo_core::{RingKind, TimeFormat};

/// Time of day broken into the units the rings display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSample {
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
    /// Millisecond within the second, 0-999.
    pub millisecond: u32,
}

impl TimeSample {
    /// Build a sample, clamping each field into its range.
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            millisecond: millisecond.min(999),
        }
    }

    /// Sample any chrono time value.
    ///
    /// A leap second is reported by chrono as second 59 with more than a
    /// billion nanoseconds; it is held at 59.999 here.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self::new(
            time.hour(),
            time.minute(),
            time.second(),
            time.nanosecond() / 1_000_000,
        )
    }

    /// Seconds including the sub-second fraction, in `[0, 60)`.
    pub fn seconds_fraction(&self) -> f32 {
        self.second as f32 + self.millisecond as f32 / 1000.0
    }

    /// Index of the numeral matching this time on the given ring.
    ///
    /// On a 12-hour ring the numerals are 1..=12 stored at indices 0..=11,
    /// so both midnight and noon land on index 11. The result is always a
    /// valid index for the ring, even for hand-built out-of-range samples.
    pub fn highlighted_index(&self, kind: RingKind, format: TimeFormat) -> usize {
        let index = match kind {
            RingKind::Seconds => self.second as usize,
            RingKind::Minutes => self.minute as usize,
            RingKind::Hours => match format {
                TimeFormat::TwentyFourHour => self.hour as usize,
                TimeFormat::TwelveHour => match self.hour % 12 {
                    0 => 11,
                    h => (h - 1) as usize,
                },
            },
        };
        index.min(kind.units(format) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> TimeSample {
        TimeSample::from_time(&NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap())
    }

    #[test]
    fn test_midnight_highlights_first_second() {
        let t = at(0, 0, 0, 0);
        assert_eq!(t.highlighted_index(RingKind::Seconds, TimeFormat::TwelveHour), 0);
        assert_eq!(t.highlighted_index(RingKind::Minutes, TimeFormat::TwelveHour), 0);
        assert!(approx(t.seconds_fraction(), 0.0));
    }

    #[test]
    fn test_seconds_fraction() {
        let t = at(12, 34, 56, 500);
        assert_eq!(t.highlighted_index(RingKind::Seconds, TimeFormat::TwelveHour), 56);
        assert_eq!(t.highlighted_index(RingKind::Minutes, TimeFormat::TwelveHour), 34);
        assert!(approx(t.seconds_fraction(), 56.5));
    }

    #[test]
    fn test_twenty_four_hour_index() {
        for hour in [0, 1, 12, 23] {
            let t = at(hour, 0, 0, 0);
            assert_eq!(
                t.highlighted_index(RingKind::Hours, TimeFormat::TwentyFourHour),
                hour as usize
            );
        }
    }

    #[test]
    fn test_twelve_hour_index() {
        assert_eq!(at(0, 0, 0, 0).highlighted_index(RingKind::Hours, TimeFormat::TwelveHour), 11);
        assert_eq!(at(12, 0, 0, 0).highlighted_index(RingKind::Hours, TimeFormat::TwelveHour), 11);
        assert_eq!(at(1, 0, 0, 0).highlighted_index(RingKind::Hours, TimeFormat::TwelveHour), 0);
        assert_eq!(at(13, 0, 0, 0).highlighted_index(RingKind::Hours, TimeFormat::TwelveHour), 0);
        assert_eq!(at(23, 0, 0, 0).highlighted_index(RingKind::Hours, TimeFormat::TwelveHour), 10);
    }

    #[test]
    fn test_literal_sample_index_stays_in_ring() {
        let t = TimeSample {
            hour: 24,
            minute: 60,
            second: 99,
            millisecond: 0,
        };
        assert_eq!(t.highlighted_index(RingKind::Hours, TimeFormat::TwentyFourHour), 23);
        assert_eq!(t.highlighted_index(RingKind::Minutes, TimeFormat::TwelveHour), 59);
        assert_eq!(t.highlighted_index(RingKind::Seconds, TimeFormat::TwelveHour), 59);
    }

    #[test]
    fn test_leap_second_is_clamped() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let t = TimeSample::from_time(&leap);
        assert_eq!(t.second, 59);
        assert_eq!(t.millisecond, 999);
        assert!(t.seconds_fraction() < 60.0);
    }
}
