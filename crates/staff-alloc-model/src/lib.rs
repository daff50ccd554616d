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

//! # Staff Allocation Model (`staff-alloc-model`)
//!
//! Typed representation of the assignment data handed to the allocation
//! engine, built on the value types of `staff-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **`AssignmentRecord`**: a raw record exactly as the external data layer
//!   delivers it (camelCase JSON, dates as strings, a percent that may be a
//!   number or a string).
//!
//! - **`Assignment`**: a validated record. Its date range is never inverted
//!   and its percent is always a finite number.
//!
//! - **`Snapshot`**: the validated assignment collection at one moment. Every
//!   record is checked once on ingestion; records with unusable dates are
//!   quarantined and every problem is kept as a `Diagnostic`.
//!
//! - **`SnapshotGenerator`**: seeded synthetic snapshots, including a share of
//!   deliberately malformed records.
//!
//! ## Error taxonomy
//!
//! Per-record problems never abort ingestion:
//!
//! - `MalformedRecordError`: the element is not a record at all (wrong shape,
//!   non-string identifier) and is excluded from all aggregates.
//! - `MalformedDateError`: the record is excluded from all aggregates.
//! - `InvertedRangeWarning`: the record is excluded from all aggregates.
//! - `InvalidAllocationError`: the record is kept with a percent of zero.

pub mod assignment;
pub mod err;
pub mod generator;
pub mod id;
pub mod record;
pub mod snapshot;

pub mod prelude {
    pub use crate::assignment::Assignment;
    pub use crate::err::{
        DateField, Diagnostic, Diagnostics, InvalidAllocationError, InvertedRangeWarning,
        MalformedDateError, MalformedRecordError, RecordIssue, RecordRef, SnapshotLoadError,
    };
    pub use crate::generator::{
        SnapshotGenConfig, SnapshotGenConfigBuildError, SnapshotGenConfigBuilder,
        SnapshotGenerator,
    };
    pub use crate::id::{AssignmentId, ProjectId, ResourceId, Trade};
    pub use crate::record::{AssignmentRecord, RawPercent, RecordOutcome};
    pub use crate::snapshot::Snapshot;
}
