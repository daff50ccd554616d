// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Sunday-aligned week buckets.

use crate::time::{Day, DayDelta, DayInterval};
use serde::Serialize;
use std::fmt::Display;

pub const DAYS_PER_WEEK: i64 = 7;

/// A Sunday-to-Saturday bucket of seven consecutive days.
///
/// `start` is always a Sunday and `end` is always `start + 6 days`; the only
/// constructors enforce this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    start_date: Day,
    end_date: Day,
}

impl WeekBucket {
    /// The bucket containing `day`.
    #[inline]
    pub fn containing(day: Day) -> Self {
        let start = day.week_start();
        Self {
            start_date: start,
            end_date: start + DayDelta::new(DAYS_PER_WEEK - 1),
        }
    }

    /// The bucket starting on `sunday`, or `None` if `sunday` is not a Sunday.
    #[inline]
    pub fn starting_on(sunday: Day) -> Option<Self> {
        sunday.is_sunday().then(|| Self::containing(sunday))
    }

    #[inline]
    pub fn start(&self) -> Day {
        self.start_date
    }

    #[inline]
    pub fn end(&self) -> Day {
        self.end_date
    }

    #[inline]
    pub fn interval(&self) -> DayInterval {
        DayInterval::new(self.start_date, self.end_date)
    }

    #[inline]
    pub fn contains(&self, day: Day) -> bool {
        self.interval().contains(day)
    }

    /// The bucket `weeks` weeks later (earlier when negative).
    #[inline]
    pub fn offset(&self, weeks: i64) -> Self {
        Self::containing(self.start_date + DayDelta::weeks(weeks))
    }

    #[inline]
    pub fn next(&self) -> Self {
        self.offset(1)
    }

    #[inline]
    pub fn previous(&self) -> Self {
        self.offset(-1)
    }
}

impl Display for WeekBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week({}..{})", self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).expect("valid date")
    }

    #[test]
    fn test_containing_aligns_to_sunday() {
        let w = WeekBucket::containing(day(2024, 6, 12));
        assert_eq!(w.start(), day(2024, 6, 9));
        assert_eq!(w.end(), day(2024, 6, 15));
    }

    #[test]
    fn test_saturday_belongs_to_the_week_before_the_next_sunday() {
        let w = WeekBucket::containing(day(2024, 6, 15));
        assert_eq!(w.start(), day(2024, 6, 9));
        assert!(!w.next().contains(day(2024, 6, 15)));
    }

    #[test]
    fn test_starting_on_requires_sunday() {
        assert!(WeekBucket::starting_on(day(2024, 6, 9)).is_some());
        assert!(WeekBucket::starting_on(day(2024, 6, 10)).is_none());
    }

    #[test]
    fn test_contains_covers_exactly_seven_days() {
        let w = WeekBucket::containing(day(2024, 6, 9));
        assert!(!w.contains(day(2024, 6, 8)));
        assert!(w.contains(day(2024, 6, 9)));
        assert!(w.contains(day(2024, 6, 15)));
        assert!(!w.contains(day(2024, 6, 16)));
        assert_eq!(w.end() - w.start(), DayDelta::new(6));
    }

    #[test]
    fn test_offset_moves_whole_weeks() {
        let w = WeekBucket::containing(day(2024, 6, 9));
        assert_eq!(w.next().start(), day(2024, 6, 16));
        assert_eq!(w.previous().start(), day(2024, 6, 2));
        assert_eq!(w.offset(4).start(), day(2024, 7, 7));
        assert_eq!(w.next().previous(), w);
    }

    #[test]
    fn test_display_shows_both_bounds() {
        let w = WeekBucket::containing(day(2024, 6, 12));
        assert_eq!(format!("{}", w), "Week(2024-06-09..2024-06-15)");
    }
}
