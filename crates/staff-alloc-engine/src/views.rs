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

//! Presentation-ready compositions of the aggregation primitives.
//!
//! Every surface (roster, workload grid, hour curve) is built from the same
//! window generator, overlap test and aggregator, so two surfaces looking at
//! the same snapshot and week always report the same numbers.

use crate::{
    aggregate::{project_hours_grid, resource_percent_grid, trade_hours_grid},
    classify::{Classification, classify_with},
    config::EngineConfig,
    cursor::WeekCursor,
    summary::{WeekSummary, current_week_summary_at},
};
use serde::Serialize;
use staff_alloc_core::{
    quantity::{Hours, Percent},
    time::Day,
    week::WeekBucket,
};
use staff_alloc_model::{
    id::{ProjectId, ResourceId, Trade},
    snapshot::Snapshot,
};
use tracing::{debug, instrument};

/// This week's figure for a list of resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    today: Day,
    entries: Vec<WeekSummary>,
    over_allocated: usize,
}

impl RosterSummary {
    #[instrument(level = "debug", skip_all, fields(today = %today))]
    pub fn build(
        snapshot: &Snapshot,
        resources: &[ResourceId],
        today: Day,
        config: &EngineConfig,
    ) -> Self {
        let entries: Vec<WeekSummary> = resources
            .iter()
            .map(|r| current_week_summary_at(snapshot.assignments(), r, today, config))
            .collect();
        let over_allocated = entries
            .iter()
            .filter(|e| e.classification().is_over_allocated())
            .count();
        debug!(resources = entries.len(), over_allocated, "roster summary built");
        Self {
            today,
            entries,
            over_allocated,
        }
    }

    #[inline]
    pub fn today(&self) -> Day {
        self.today
    }

    #[inline]
    pub fn entries(&self) -> &[WeekSummary] {
        &self.entries
    }

    #[inline]
    pub fn over_allocated(&self) -> usize {
        self.over_allocated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadCell {
    pub percent: Percent,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRow {
    pub resource_id: ResourceId,
    pub cells: Vec<WorkloadCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverAllocation {
    pub resource_id: ResourceId,
    pub week: WeekBucket,
}

/// Resources by weeks, each cell with its percent and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadGrid {
    weeks: Vec<WeekBucket>,
    rows: Vec<WorkloadRow>,
    over_allocated: Vec<OverAllocation>,
}

impl WorkloadGrid {
    /// Every resource in the snapshot over `count` weeks from the cursor.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn build(
        snapshot: &Snapshot,
        cursor: WeekCursor,
        count: usize,
        config: &EngineConfig,
    ) -> Self {
        Self::build_for(snapshot, &snapshot.resource_ids(), cursor, count, config)
    }

    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[instrument(level = "debug", skip_all, fields(anchor = %cursor.anchor(), weeks = count))]
    pub fn build_for(
        snapshot: &Snapshot,
        resources: &[ResourceId],
        cursor: WeekCursor,
        count: usize,
        config: &EngineConfig,
    ) -> Self {
        let window = cursor.window(count);
        let grid = resource_percent_grid(snapshot.assignments(), resources, &window, config);

        let mut rows = Vec::with_capacity(grid.entities().len());
        let mut over_allocated = Vec::new();
        for (resource_id, percents) in grid.rows() {
            let cells = percents
                .iter()
                .zip(window.iter())
                .map(|(&percent, week)| {
                    let classification = classify_with(percent, config.over_allocation_threshold);
                    if classification.is_over_allocated() {
                        over_allocated.push(OverAllocation {
                            resource_id: resource_id.clone(),
                            week: *week,
                        });
                    }
                    WorkloadCell {
                        percent,
                        classification,
                    }
                })
                .collect();
            rows.push(WorkloadRow {
                resource_id: resource_id.clone(),
                cells,
            });
        }

        debug!(
            resources = rows.len(),
            over_allocated = over_allocated.len(),
            "workload grid built"
        );
        Self {
            weeks: window.weeks().to_vec(),
            rows,
            over_allocated,
        }
    }

    #[inline]
    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    #[inline]
    pub fn rows(&self) -> &[WorkloadRow] {
        &self.rows
    }

    #[inline]
    pub fn over_allocated(&self) -> &[OverAllocation] {
        &self.over_allocated
    }

    pub fn row(&self, resource_id: &ResourceId) -> Option<&WorkloadRow> {
        self.rows.iter().find(|r| &r.resource_id == resource_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSeries {
    pub trade: Trade,
    pub hours: Vec<Hours>,
}

/// Weekly and cumulative hours for one project, with a per-trade split.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCurve {
    project_id: ProjectId,
    weeks: Vec<WeekBucket>,
    hours: Vec<Hours>,
    by_trade: Vec<TradeSeries>,
    cumulative: Vec<Hours>,
    total: Hours,
}

impl HourCurve {
    /// # Panics
    ///
    /// Panics if `count` is zero.
    #[instrument(level = "debug", skip_all, fields(project = %project_id, weeks = count))]
    pub fn build(
        snapshot: &Snapshot,
        project_id: &ProjectId,
        cursor: WeekCursor,
        count: usize,
        config: &EngineConfig,
    ) -> Self {
        let window = cursor.window(count);
        let assignments = snapshot.assignments();

        let project = project_hours_grid(
            assignments,
            std::slice::from_ref(project_id),
            &window,
            config,
        );
        let hours = project.row(project_id).map(<[Hours]>::to_vec).unwrap_or_default();

        let by_trade = trade_hours_grid(assignments, project_id, &window, config)
            .rows()
            .map(|(trade, hours)| TradeSeries {
                trade: trade.clone(),
                hours: hours.to_vec(),
            })
            .collect();

        let cumulative: Vec<Hours> = hours
            .iter()
            .scan(Hours::new(0.0), |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
        let total = cumulative.last().copied().unwrap_or_default();

        debug!(total = %total, "hour curve built");
        Self {
            project_id: project_id.clone(),
            weeks: window.weeks().to_vec(),
            hours,
            by_trade,
            cumulative,
            total,
        }
    }

    #[inline]
    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    #[inline]
    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    #[inline]
    pub fn hours(&self) -> &[Hours] {
        &self.hours
    }

    #[inline]
    pub fn by_trade(&self) -> &[TradeSeries] {
        &self.by_trade
    }

    #[inline]
    pub fn cumulative(&self) -> &[Hours] {
        &self.cumulative
    }

    #[inline]
    pub fn total(&self) -> Hours {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::aggregate_project_hours, config::ViewConfig};
    use staff_alloc_model::record::AssignmentRecord;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).expect("valid date")
    }

    fn record(
        resource: &str,
        project: &str,
        start: &str,
        end: &str,
        pct: f64,
        trade: Option<&str>,
    ) -> AssignmentRecord {
        let mut r = AssignmentRecord::new(resource, project, start, end, pct);
        r.trade = trade.map(str::to_owned);
        r
    }

    fn snapshot() -> Snapshot {
        let records = [
            record("r1", "p1", "2024-06-01", "2024-06-20", 60.0, Some("civil")),
            record("r1", "p2", "2024-06-10", "2024-06-12", 70.0, None),
            record("r2", "p1", "2024-06-16", "2024-07-10", 50.0, Some("electrical")),
            record("r2", "p1", "2024-06-16", "", 50.0, Some("electrical")),
            record("r3", "p1", "2024-06-09", "2024-06-09", 25.0, None),
        ];
        Snapshot::ingest(&records)
    }

    #[test]
    fn test_roster_counts_over_allocated_resources() {
        let snap = snapshot();
        let roster = RosterSummary::build(
            &snap,
            &snap.resource_ids(),
            day(2024, 6, 12),
            &EngineConfig::default(),
        );
        let percents: Vec<f64> = roster.entries().iter().map(|e| e.percent().value()).collect();
        assert_eq!(percents, vec![130.0, 0.0, 25.0]);
        assert_eq!(roster.over_allocated(), 1);
    }

    #[test]
    fn test_workload_grid_lists_over_allocated_cells() {
        let snap = snapshot();
        let cursor = WeekCursor::new(day(2024, 6, 12));
        let grid = WorkloadGrid::build(
            &snap,
            cursor,
            ViewConfig::default().workload_weeks,
            &EngineConfig::default(),
        );
        assert_eq!(grid.weeks().len(), 16);
        assert_eq!(grid.rows().len(), 3);
        assert_eq!(
            grid.over_allocated(),
            &[OverAllocation {
                resource_id: ResourceId::new("r1"),
                week: WeekBucket::containing(day(2024, 6, 9)),
            }]
        );
        let r2 = grid.row(&ResourceId::new("r2")).expect("r2 present");
        assert_eq!(r2.cells[0].percent, Percent::new(0.0));
        assert_eq!(r2.cells[1].percent, Percent::new(50.0));
    }

    #[test]
    fn test_workload_grid_moves_with_cursor() {
        let snap = snapshot();
        let cursor = WeekCursor::new(day(2024, 6, 12));
        let config = EngineConfig::default();
        let now = WorkloadGrid::build(&snap, cursor, 4, &config);
        let next = WorkloadGrid::build(&snap, cursor.next_week(), 4, &config);
        assert_eq!(now.weeks()[1], next.weeks()[0]);
        for (a, b) in now.rows().iter().zip(next.rows()) {
            assert_eq!(a.cells[1..], b.cells[..3]);
        }
    }

    #[test]
    fn test_hour_curve_cumulative_and_trades() {
        let snap = snapshot();
        let p1 = ProjectId::new("p1");
        let cursor = WeekCursor::new(day(2024, 6, 2));
        let curve = HourCurve::build(
            &snap,
            &p1,
            cursor,
            ViewConfig::default().curve_weeks,
            &EngineConfig::default(),
        );
        assert_eq!(curve.weeks().len(), 25);
        for (i, w) in curve.weeks().iter().enumerate() {
            assert_eq!(curve.hours()[i], aggregate_project_hours(snap.assignments(), &p1, w));
        }
        assert_eq!(curve.hours()[0], Hours::new(24.0));
        assert_eq!(curve.hours()[1], Hours::new(34.0));
        assert_eq!(curve.hours()[2], Hours::new(44.0));
        assert_eq!(curve.cumulative()[2], Hours::new(102.0));
        assert_eq!(curve.total(), *curve.cumulative().last().unwrap());

        let trades: Vec<&str> = curve.by_trade().iter().map(|t| t.trade.as_str()).collect();
        assert_eq!(trades, vec!["civil", "electrical", "unspecified"]);
        for (i, h) in curve.hours().iter().enumerate() {
            let split: f64 = curve.by_trade().iter().map(|t| t.hours[i].value()).sum();
            assert!((split - h.value()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hour_curve_for_unknown_project_is_flat() {
        let snap = snapshot();
        let curve = HourCurve::build(
            &snap,
            &ProjectId::new("nope"),
            WeekCursor::new(day(2024, 6, 2)),
            5,
            &EngineConfig::default(),
        );
        assert!(curve.hours().iter().all(|h| h.value() == 0.0));
        assert!(curve.by_trade().is_empty());
        assert_eq!(curve.total(), Hours::new(0.0));
    }

    #[test]
    fn test_views_serialize_camel_case() {
        let snap = snapshot();
        let curve = HourCurve::build(
            &snap,
            &ProjectId::new("p1"),
            WeekCursor::new(day(2024, 6, 2)),
            2,
            &EngineConfig::default(),
        );
        let json = serde_json::to_value(&curve).expect("serializes");
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["weeks"][0]["startDate"], "2024-06-02");
        assert!(json["byTrade"].is_array());
    }
}
