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

//! # Core Primitives
//!
//! Generic building blocks reused by the calendar and week types.

use std::cmp::Ordering;
use std::fmt;

/// A closed interval `[start, end]`.
///
/// Both bounds are inclusive, so `[start, end]` includes all values `x` such
/// that `start <= x <= end`. An interval always satisfies `start <= end`; a
/// single point is represented as `[x, x]`.
///
/// # Examples
///
/// ```
/// use staff_alloc_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(5));
/// assert!(!interval.contains(6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_inclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new closed interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or if the bounds are not comparable.
    /// Use [`Interval::try_new`] when the bounds come from untrusted data.
    ///
    /// # Examples
    ///
    /// ```
    /// use staff_alloc_core::primitives::Interval;
    ///
    /// let interval = Interval::new(3, 3);
    /// assert_eq!(interval.start(), interval.end());
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::try_new(start, end).expect("Interval::new: start must be <= end")
    }

    /// Creates a new closed interval, or `None` when `start > end` or the
    /// bounds are not comparable.
    ///
    /// Unlike a half-open range, an inverted pair is never reinterpreted by
    /// swapping its bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use staff_alloc_core::primitives::Interval;
    ///
    /// assert!(Interval::try_new(1, 5).is_some());
    /// assert!(Interval::try_new(5, 1).is_none());
    /// assert!(Interval::try_new(f64::NAN, 1.0).is_none());
    /// ```
    #[inline]
    pub fn try_new(start: T, end: T) -> Option<Self>
    where
        T: PartialOrd + Copy,
    {
        match start.partial_cmp(&end)? {
            Ordering::Greater => None,
            _ => Some(Self {
                start_inclusive: start,
                end_inclusive: end,
            }),
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the inclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_inclusive
    }

    /// Returns `true` if the interval covers exactly one point.
    #[inline]
    pub fn is_point(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_inclusive
    }

    /// Checks if the interval contains a value, bounds included.
    ///
    /// # Examples
    ///
    /// ```
    /// use staff_alloc_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5);
    /// assert!(interval.contains(1));
    /// assert!(interval.contains(5));
    /// assert!(!interval.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x <= self.end_inclusive
    }

    /// Checks if this interval fully contains `other`.
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        other.start_inclusive >= self.start_inclusive && other.end_inclusive <= self.end_inclusive
    }

    /// Checks if the two closed intervals share at least one point.
    ///
    /// This is the test `self.start <= other.end && self.end >= other.start`;
    /// intervals touching at a single point intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use staff_alloc_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert!(a.intersects(&Interval::new(5, 9)));
    /// assert!(!a.intersects(&Interval::new(6, 9)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive <= other.end_inclusive && self.end_inclusive >= other.start_inclusive
    }

    /// Returns the overlap of two intervals, or `None` if they are disjoint.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_inclusive < other.end_inclusive {
            self.end_inclusive
        } else {
            other.end_inclusive
        };
        Self::try_new(start, end)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start_inclusive, self.end_inclusive)
    }
}
