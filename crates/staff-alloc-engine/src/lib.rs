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

//! # Staff Allocation Engine (`staff-alloc-engine`)
//!
//! Turns a validated assignment [`Snapshot`](staff_alloc_model::snapshot::Snapshot)
//! into weekly totals per resource and per project.
//!
//! ## Pipeline
//!
//! 1. **Window** ([`window`]): Sunday-aligned week buckets starting at the
//!    bucket that contains an anchor day.
//! 2. **Overlap** ([`overlap`]): closed-interval test between an assignment
//!    and a week.
//! 3. **Aggregate** ([`aggregate`]): percent per `(resource, week)` and hours
//!    per `(project, week)`, either one cell at a time or as a dense grid.
//! 4. **Classify** ([`classify`]): `OverAllocated` above a full week.
//!
//! [`summary`], [`cursor`] and [`views`] compose these steps into the values
//! the roster, workload grid and hour curve display.
//!
//! Nothing is cached between calls. Every function takes the snapshot it
//! works on as an argument and leaves it untouched.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod cursor;
pub mod err;
pub mod overlap;
pub mod summary;
pub mod views;
pub mod window;

pub mod prelude {
    pub use crate::aggregate::{
        AggregationGrid, aggregate_project_hours, aggregate_project_hours_with,
        aggregate_resource_percent, project_hours_grid, resource_percent_grid, trade_hours_grid,
    };
    pub use crate::classify::{Classification, classify, classify_with};
    pub use crate::config::{AggregationStrategy, EngineConfig, ViewConfig};
    pub use crate::cursor::WeekCursor;
    pub use crate::err::WindowError;
    pub use crate::overlap::{overlaps, overlaps_record};
    pub use crate::summary::{WeekSummary, current_week_summary, current_week_summary_at};
    pub use crate::views::{
        HourCurve, OverAllocation, RosterSummary, TradeSeries, WorkloadCell, WorkloadGrid,
        WorkloadRow,
    };
    pub use crate::window::{WeekWindow, generate_weeks, try_generate_weeks};
}
