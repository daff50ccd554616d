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

//! Week navigation for multi-week views.

use crate::window::WeekWindow;
use staff_alloc_core::time::{Day, DayDelta};
use std::fmt::Display;

/// The anchor day a view's window is generated from.
///
/// A cursor is a plain value owned by the caller. Moving it returns a new
/// cursor, so every view holds its own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekCursor {
    anchor: Day,
}

impl WeekCursor {
    #[inline]
    pub fn new(anchor: Day) -> Self {
        Self { anchor }
    }

    /// A cursor on the local current date.
    #[inline]
    pub fn today() -> Self {
        Self::new(Day::today())
    }

    #[inline]
    pub fn anchor(&self) -> Day {
        self.anchor
    }

    #[inline]
    pub fn next_week(self) -> Self {
        self.shift_weeks(1)
    }

    #[inline]
    pub fn previous_week(self) -> Self {
        self.shift_weeks(-1)
    }

    #[inline]
    pub fn shift_weeks(self, weeks: i64) -> Self {
        Self::new(self.anchor + DayDelta::weeks(weeks))
    }

    #[inline]
    pub fn reset_to(self, today: Day) -> Self {
        Self::new(today)
    }

    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[inline]
    pub fn window(&self, count: usize) -> WeekWindow {
        WeekWindow::new(self.anchor, count)
    }

    /// Whether `day` falls inside the `count`-week window at this cursor.
    pub fn contains(&self, day: Day, count: usize) -> bool {
        self.window(count).index_of(day).is_some()
    }
}

impl Display for WeekCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeekCursor({})", self.anchor)
    }
}
