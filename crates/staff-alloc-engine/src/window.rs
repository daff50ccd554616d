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

//! Week window generation.
//!
//! A window is a contiguous run of Sunday-aligned week buckets starting at
//! the bucket that contains an anchor day. Every surface derives its weeks
//! from here, so two views over the same anchor never disagree on where a
//! week begins.

use crate::err::WindowError;
use staff_alloc_core::{
    time::{Day, DayInterval},
    week::{DAYS_PER_WEEK, WeekBucket},
};
use std::ops::RangeInclusive;

/// Generates `count` consecutive week buckets, the first one containing
/// `anchor`.
///
/// # Panics
///
/// Panics if `count` is zero. Use [`try_generate_weeks`] to get an error
/// instead.
pub fn generate_weeks(anchor: Day, count: usize) -> Vec<WeekBucket> {
    try_generate_weeks(anchor, count).expect("generate_weeks: count must be at least 1")
}

pub fn try_generate_weeks(anchor: Day, count: usize) -> Result<Vec<WeekBucket>, WindowError> {
    if count == 0 {
        return Err(WindowError::EmptyWindow);
    }
    let first = WeekBucket::containing(anchor);
    Ok((0..count as i64).map(|i| first.offset(i)).collect())
}

/// A non-empty, contiguous run of week buckets with O(1) day lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    weeks: Vec<WeekBucket>,
}

impl WeekWindow {
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[inline]
    pub fn new(anchor: Day, count: usize) -> Self {
        Self {
            weeks: generate_weeks(anchor, count),
        }
    }

    #[inline]
    pub fn try_new(anchor: Day, count: usize) -> Result<Self, WindowError> {
        try_generate_weeks(anchor, count).map(|weeks| Self { weeks })
    }

    #[inline]
    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Always `false`; a window holds at least one week.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    #[inline]
    pub fn first(&self) -> WeekBucket {
        self.weeks[0]
    }

    #[inline]
    pub fn last(&self) -> WeekBucket {
        self.weeks[self.weeks.len() - 1]
    }

    /// All days covered by the window.
    #[inline]
    pub fn span(&self) -> DayInterval {
        DayInterval::new(self.first().start(), self.last().end())
    }

    /// Index of the bucket containing `day`, if the window covers it.
    pub fn index_of(&self, day: Day) -> Option<usize> {
        if !self.span().contains(day) {
            return None;
        }
        let offset = (day - self.first().start()).value();
        Some((offset / DAYS_PER_WEEK) as usize)
    }

    /// The run of bucket indexes a closed range of days touches, clipped to
    /// the window. `None` when the range lies entirely outside it.
    pub fn covered(&self, dates: DayInterval) -> Option<RangeInclusive<usize>> {
        let clipped = self.span().intersection(&dates)?;
        Some(self.index_of(clipped.start())?..=self.index_of(clipped.end())?)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, WeekBucket> {
        self.weeks.iter()
    }
}

impl<'a> IntoIterator for &'a WeekWindow {
    type Item = &'a WeekBucket;
    type IntoIter = std::slice::Iter<'a, WeekBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.weeks.iter()
    }
}
