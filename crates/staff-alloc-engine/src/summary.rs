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

//! The "this week" figure shown next to each resource.

use crate::{
    aggregate::aggregate_resource_percent,
    classify::{Classification, classify_with},
    config::EngineConfig,
    window::WeekWindow,
};
use serde::Serialize;
use staff_alloc_core::{quantity::Percent, time::Day, week::WeekBucket};
use staff_alloc_model::{assignment::Assignment, id::ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    resource_id: ResourceId,
    week: WeekBucket,
    percent: Percent,
    classification: Classification,
}

impl WeekSummary {
    #[inline]
    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    #[inline]
    pub fn week(&self) -> WeekBucket {
        self.week
    }

    #[inline]
    pub fn percent(&self) -> Percent {
        self.percent
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }
}

/// Summary for the week containing the local current date.
pub fn current_week_summary(assignments: &[Assignment], resource_id: &ResourceId) -> WeekSummary {
    current_week_summary_at(
        assignments,
        resource_id,
        Day::today(),
        &EngineConfig::default(),
    )
}

/// Summary for the week containing `today`. The week comes from the same
/// window generator the grids use.
pub fn current_week_summary_at(
    assignments: &[Assignment],
    resource_id: &ResourceId,
    today: Day,
    config: &EngineConfig,
) -> WeekSummary {
    let week = WeekWindow::new(today, 1).first();
    let percent = aggregate_resource_percent(assignments, resource_id, &week);
    WeekSummary {
        resource_id: resource_id.clone(),
        week,
        percent,
        classification: classify_with(percent, config.over_allocation_threshold),
    }
}
