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

//! # Staff Allocation Core (`staff-alloc-core`)
//!
//! Immutable value types shared by the allocation model and engine crates.
//!
//! ## Key Concepts
//!
//! - **Calendar**:
//!   - `Day`: a calendar date without time-of-day semantics.
//!   - `DayDelta`: a signed number of whole days between two `Day`s.
//!   - `DayInterval`: a closed interval `[first, last]` of days.
//!
//! - **Weeks**:
//!   - `WeekBucket`: a Sunday-to-Saturday bucket, the fixed granularity of all
//!     aggregation.
//!
//! - **Quantities**:
//!   - `Percent`: a share of a resource's weekly capacity.
//!   - `Hours`: work hours derived from a `Percent` and a standard week.
//!
//! Every type here is `Copy` and exposes only pure operations, so a value can
//! be shared freely between threads and call sites without aliasing hazards.

pub mod primitives;
pub mod quantity;
pub mod time;
pub mod week;

pub mod prelude {
    pub use crate::primitives::Interval;
    pub use crate::quantity::{Hours, Percent};
    pub use crate::time::{Day, DayDelta, DayInterval, DayParseError};
    pub use crate::week::{DAYS_PER_WEEK, WeekBucket};
}
