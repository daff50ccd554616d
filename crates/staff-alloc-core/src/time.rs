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

//! # Calendar Types
//!
//! - `Day`: a calendar date, compared and shifted by whole days only.
//! - `DayDelta`: a signed count of days.
//! - `DayInterval`: a closed interval `[first, last]` of `Day`s.
//!
//! `Day` is an immutable value: shifting it returns a new `Day`. Checked
//! variants return `None` at the end of the representable calendar, the
//! operator forms panic there.

use crate::primitives::Interval;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

pub type DayInterval = Interval<Day>;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(NaiveDate);

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DayDelta(i64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayParseError {
    raw: String,
}

impl DayParseError {
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Display for DayParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid calendar date: {:?}", self.raw)
    }
}

impl std::error::Error for DayParseError {}

impl DayDelta {
    #[inline]
    pub const fn new(days: i64) -> Self {
        Self(days)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn weeks(weeks: i64) -> Self {
        Self(weeks * 7)
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Display for DayDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DayDelta({})", self.0)
    }
}

impl From<i64> for DayDelta {
    #[inline]
    fn from(v: i64) -> Self {
        DayDelta(v)
    }
}

impl Day {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Day(date)
    }

    /// Builds a day from year, month and day-of-month, or `None` if the
    /// combination is not a real calendar date.
    #[inline]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Day)
    }

    /// The current date in the local time zone.
    #[inline]
    pub fn today() -> Self {
        Day(chrono::Local::now().date_naive())
    }

    #[inline]
    pub const fn value(self) -> NaiveDate {
        self.0
    }

    /// Days since the most recent Sunday, with Sunday = 0.
    #[inline]
    pub fn weekday_offset(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    #[inline]
    pub fn is_sunday(self) -> bool {
        self.weekday_offset() == 0
    }

    /// The Sunday on or before this day.
    #[inline]
    pub fn week_start(self) -> Day {
        self - DayDelta::new(i64::from(self.weekday_offset()))
    }

    #[inline]
    pub fn checked_add(self, delta: DayDelta) -> Option<Self> {
        let magnitude = Days::new(delta.0.unsigned_abs());
        if delta.is_negative() {
            self.0.checked_sub_days(magnitude).map(Day)
        } else {
            self.0.checked_add_days(magnitude).map(Day)
        }
    }

    #[inline]
    pub fn checked_sub(self, delta: DayDelta) -> Option<Self> {
        self.checked_add(-delta)
    }

    /// Parses a calendar date from a raw record field.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`
    /// after trimming surrounding whitespace. Only the calendar date part of
    /// a timestamp is kept.
    pub fn parse(raw: &str) -> Result<Self, DayParseError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(DayParseError::new(raw));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Day(date));
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(Day(ts.date_naive()));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(|ts| Day(ts.date()))
            .map_err(|_| DayParseError::new(raw))
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::parse(s)
    }
}

impl From<NaiveDate> for Day {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Day(date)
    }
}

impl Add<DayDelta> for Day {
    type Output = Day;

    #[inline]
    fn add(self, rhs: DayDelta) -> Self::Output {
        self.checked_add(rhs).expect("overflow in Day + DayDelta")
    }
}

impl AddAssign<DayDelta> for Day {
    fn add_assign(&mut self, rhs: DayDelta) {
        *self = self.checked_add(rhs).expect("overflow in Day += DayDelta");
    }
}

impl Sub<DayDelta> for Day {
    type Output = Day;

    #[inline]
    fn sub(self, rhs: DayDelta) -> Self::Output {
        self.checked_sub(rhs).expect("underflow in Day - DayDelta")
    }
}

impl SubAssign<DayDelta> for Day {
    fn sub_assign(&mut self, rhs: DayDelta) {
        *self = self.checked_sub(rhs).expect("underflow in Day -= DayDelta");
    }
}

impl Sub<Day> for Day {
    type Output = DayDelta;

    #[inline]
    fn sub(self, rhs: Day) -> Self::Output {
        DayDelta(self.0.signed_duration_since(rhs.0).num_days())
    }
}

impl Add for DayDelta {
    type Output = DayDelta;

    fn add(self, rhs: Self) -> Self::Output {
        DayDelta(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in DayDelta + DayDelta"),
        )
    }
}

impl Sub for DayDelta {
    type Output = DayDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        DayDelta(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in DayDelta - DayDelta"),
        )
    }
}

impl Neg for DayDelta {
    type Output = DayDelta;

    fn neg(self) -> Self::Output {
        DayDelta(self.0.checked_neg().expect("underflow in -DayDelta"))
    }
}

impl Mul<i64> for DayDelta {
    type Output = DayDelta;

    fn mul(self, rhs: i64) -> Self::Output {
        DayDelta(
            self.0
                .checked_mul(rhs)
                .expect("overflow in DayDelta * scalar"),
        )
    }
}
