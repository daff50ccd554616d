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

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
};

/// A share of one resource's weekly capacity, where `100` is a full week.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

/// Work hours.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(f64);

impl Percent {
    pub const FULL: Percent = Percent(100.0);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Converts a share of a week into hours: `(percent / 100) * hours_per_week`.
    #[inline]
    pub fn to_hours(self, hours_per_week: Hours) -> Hours {
        Hours((self.0 / 100.0) * hours_per_week.0)
    }
}

impl Hours {
    pub const STANDARD_WEEK: Hours = Hours(40.0);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Hours(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

macro_rules! quantity_ops {
    ($ty:ident, $unit:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", self.0, $unit)
            }
        }

        impl From<f64> for $ty {
            #[inline]
            fn from(v: f64) -> Self {
                $ty(v)
            }
        }

        impl Add for $ty {
            type Output = $ty;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                $ty(self.0 + rhs.0)
            }
        }

        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                $ty(self.0 - rhs.0)
            }
        }

        impl Zero for $ty {
            #[inline]
            fn zero() -> Self {
                $ty(0.0)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0 == 0.0
            }
        }

        impl Sum for $ty {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold($ty::zero(), |acc, x| acc + x)
            }
        }

        impl<'a> Sum<&'a $ty> for $ty {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold($ty::zero(), |acc, x| acc + *x)
            }
        }
    };
}

quantity_ops!(Percent, "%");
quantity_ops!(Hours, "h");
