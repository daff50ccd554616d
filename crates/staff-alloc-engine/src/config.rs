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

use staff_alloc_core::quantity::{Hours, Percent};

/// How grid aggregation walks the snapshot.
///
/// Both strategies add contributions to each cell in snapshot order, so they
/// produce bit-identical grids; only their cost differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationStrategy {
    /// Tests every assignment against every `(entity, week)` cell.
    #[default]
    Scan,
    /// Visits each assignment once and adds it to the run of weeks it covers.
    Indexed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub hours_per_week: Hours,
    pub over_allocation_threshold: Percent,
    pub strategy: AggregationStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hours_per_week: Hours::STANDARD_WEEK,
            over_allocation_threshold: Percent::FULL,
            strategy: AggregationStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub workload_weeks: usize,
    pub curve_weeks: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            workload_weeks: 16,
            curve_weeks: 25,
        }
    }
}
