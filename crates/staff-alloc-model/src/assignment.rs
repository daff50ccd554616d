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

use crate::{
    err::InvertedRangeWarning,
    id::{AssignmentId, ProjectId, ResourceId, Trade},
};
use staff_alloc_core::{
    quantity::Percent,
    time::{Day, DayInterval},
};
use std::fmt::Display;

/// A validated commitment of one resource to one project over a closed
/// range of days, at a share of the resource's weekly capacity.
///
/// The only way to obtain an `Assignment` is through [`Assignment::new`] (or
/// by validating an [`AssignmentRecord`](crate::record::AssignmentRecord)),
/// so its date range is always well-formed and its percent always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    id: Option<AssignmentId>,
    resource_id: ResourceId,
    project_id: ProjectId,
    dates: DayInterval,
    percent: Percent,
    trade: Trade,
    activity: Option<String>,
}

impl Assignment {
    /// Creates an assignment over `[start, end]`.
    ///
    /// Fails with [`InvertedRangeWarning`] when `start > end`; the range is
    /// never swapped. A non-finite `percent` is stored as zero.
    #[inline]
    pub fn new(
        resource_id: ResourceId,
        project_id: ProjectId,
        start: Day,
        end: Day,
        percent: Percent,
    ) -> Result<Self, InvertedRangeWarning> {
        let dates =
            DayInterval::try_new(start, end).ok_or(InvertedRangeWarning::new(start, end))?;
        let percent = if percent.is_finite() {
            percent
        } else {
            Percent::new(0.0)
        };
        Ok(Self {
            id: None,
            resource_id,
            project_id,
            dates,
            percent,
            trade: Trade::unspecified(),
            activity: None,
        })
    }

    #[inline]
    pub fn with_id(mut self, id: AssignmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[inline]
    pub fn with_trade(mut self, trade: Trade) -> Self {
        self.trade = trade;
        self
    }

    #[inline]
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    #[inline]
    pub fn id(&self) -> Option<&AssignmentId> {
        self.id.as_ref()
    }

    #[inline]
    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    #[inline]
    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    #[inline]
    pub fn dates(&self) -> DayInterval {
        self.dates
    }

    #[inline]
    pub fn start(&self) -> Day {
        self.dates.start()
    }

    #[inline]
    pub fn end(&self) -> Day {
        self.dates.end()
    }

    #[inline]
    pub fn percent(&self) -> Percent {
        self.percent
    }

    /// The assignment's trade, [`Trade::unspecified`] when none was given.
    #[inline]
    pub fn trade(&self) -> &Trade {
        &self.trade
    }

    #[inline]
    pub fn activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Assignment(resource: {}, project: {}, dates: {}, percent: {}, trade: {})",
            self.resource_id, self.project_id, self.dates, self.percent, self.trade
        )
    }
}
