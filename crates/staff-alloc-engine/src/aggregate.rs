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

//! Per-entity, per-week aggregation of assignment allocations.
//!
//! The single-cell functions recompute their total from the slice they are
//! given on every call. The grid functions compute a dense
//! `(entity, week)` table in one go and accept an [`AggregationStrategy`].
//!
//! Both strategies start every cell at zero and add contributions in
//! snapshot order, which makes the resulting grids bit-identical; the
//! indexed strategy merely skips the cells an assignment cannot touch.

use crate::{
    config::{AggregationStrategy, EngineConfig},
    overlap::overlaps,
    window::WeekWindow,
};
use num_traits::Zero;
use staff_alloc_core::{
    quantity::{Hours, Percent},
    week::WeekBucket,
};
use staff_alloc_model::{
    assignment::Assignment,
    id::{ProjectId, ResourceId, Trade},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Add,
};
use tracing::{debug, instrument};

#[inline]
fn sum_overlapping<'a, Q, I, V>(assignments: I, week: &WeekBucket, value: V) -> Q
where
    Q: Zero + Add<Output = Q> + Copy,
    I: IntoIterator<Item = &'a Assignment>,
    V: Fn(&Assignment) -> Q,
{
    assignments
        .into_iter()
        .filter(|a| overlaps(a, week))
        .fold(Q::zero(), |acc, a| acc + value(a))
}

/// Sum of the percents of every assignment of `resource_id` that overlaps
/// `week`.
pub fn aggregate_resource_percent(
    assignments: &[Assignment],
    resource_id: &ResourceId,
    week: &WeekBucket,
) -> Percent {
    sum_overlapping(
        assignments.iter().filter(|a| a.resource_id() == resource_id),
        week,
        Assignment::percent,
    )
}

/// Hours booked on `project_id` in `week`, with a 40-hour standard week.
pub fn aggregate_project_hours(
    assignments: &[Assignment],
    project_id: &ProjectId,
    week: &WeekBucket,
) -> Hours {
    aggregate_project_hours_with(assignments, project_id, week, &EngineConfig::default())
}

/// Hours booked on `project_id` in `week`. Each overlapping assignment
/// contributes `(percent / 100) * config.hours_per_week`.
pub fn aggregate_project_hours_with(
    assignments: &[Assignment],
    project_id: &ProjectId,
    week: &WeekBucket,
    config: &EngineConfig,
) -> Hours {
    let hours_per_week = config.hours_per_week;
    sum_overlapping(
        assignments.iter().filter(|a| a.project_id() == project_id),
        week,
        |a| a.percent().to_hours(hours_per_week),
    )
}

/// A dense `entities x weeks` table of aggregated quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationGrid<K, Q> {
    entities: Vec<K>,
    weeks: Vec<WeekBucket>,
    cells: Vec<Q>,
    index: BTreeMap<K, usize>,
}

impl<K: Ord + Clone, Q: Zero + Copy> AggregationGrid<K, Q> {
    /// A zeroed grid. Duplicate entities keep their first position.
    fn zeroed<I>(entities: I, window: &WeekWindow) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut index = BTreeMap::new();
        let mut unique = Vec::new();
        for entity in entities {
            if !index.contains_key(&entity) {
                index.insert(entity.clone(), unique.len());
                unique.push(entity);
            }
        }
        let cells = vec![Q::zero(); unique.len() * window.len()];
        Self {
            entities: unique,
            weeks: window.weeks().to_vec(),
            cells,
            index,
        }
    }
}

impl<K: Ord, Q: Copy> AggregationGrid<K, Q> {
    #[inline]
    pub fn entities(&self) -> &[K] {
        &self.entities
    }

    #[inline]
    pub fn weeks(&self) -> &[WeekBucket] {
        &self.weeks
    }

    #[inline]
    fn width(&self) -> usize {
        self.weeks.len()
    }

    /// The row of `entity`, one value per week.
    pub fn row(&self, entity: &K) -> Option<&[Q]> {
        let row = *self.index.get(entity)?;
        let width = self.width();
        Some(&self.cells[row * width..(row + 1) * width])
    }

    pub fn get(&self, entity: &K, week_index: usize) -> Option<Q> {
        self.row(entity)?.get(week_index).copied()
    }

    /// Rows in entity order.
    pub fn rows(&self) -> impl Iterator<Item = (&K, &[Q])> + '_ {
        let width = self.width();
        self.entities
            .iter()
            .enumerate()
            .map(move |(row, entity)| (entity, &self.cells[row * width..(row + 1) * width]))
    }

    /// Sum of a row, or `None` for an unknown entity.
    pub fn row_total(&self, entity: &K) -> Option<Q>
    where
        Q: Zero + Add<Output = Q>,
    {
        Some(self.row(entity)?.iter().fold(Q::zero(), |acc, &q| acc + q))
    }
}

fn build_grid<K, Q, I, F, V>(
    assignments: &[Assignment],
    entities: I,
    window: &WeekWindow,
    strategy: AggregationStrategy,
    key: fn(&Assignment) -> &K,
    include: F,
    value: V,
) -> AggregationGrid<K, Q>
where
    K: Ord + Clone,
    Q: Zero + Add<Output = Q> + Copy,
    I: IntoIterator<Item = K>,
    F: Fn(&Assignment) -> bool,
    V: Fn(&Assignment) -> Q,
{
    let mut grid = AggregationGrid::zeroed(entities, window);
    let width = grid.width();

    match strategy {
        AggregationStrategy::Scan => {
            for (row, entity) in grid.entities.iter().enumerate() {
                let mine: Vec<&Assignment> = assignments
                    .iter()
                    .filter(|&a| include(a) && key(a) == entity)
                    .collect();
                for (col, week) in window.iter().enumerate() {
                    grid.cells[row * width + col] =
                        sum_overlapping(mine.iter().copied(), week, &value);
                }
            }
        }
        AggregationStrategy::Indexed => {
            for a in assignments.iter().filter(|&a| include(a)) {
                let Some(&row) = grid.index.get(key(a)) else {
                    continue;
                };
                let Some(cols) = window.covered(a.dates()) else {
                    continue;
                };
                let contribution = value(a);
                for col in cols {
                    let cell = &mut grid.cells[row * width + col];
                    *cell = *cell + contribution;
                }
            }
        }
    }

    grid
}

/// Percent per `(resource, week)` over `window`.
#[instrument(level = "debug", skip_all)]
pub fn resource_percent_grid(
    assignments: &[Assignment],
    resources: &[ResourceId],
    window: &WeekWindow,
    config: &EngineConfig,
) -> AggregationGrid<ResourceId, Percent> {
    let grid = build_grid(
        assignments,
        resources.iter().cloned(),
        window,
        config.strategy,
        Assignment::resource_id,
        |_| true,
        Assignment::percent,
    );
    debug!(
        resources = grid.entities().len(),
        weeks = window.len(),
        strategy = ?config.strategy,
        "resource percent grid built"
    );
    grid
}

/// Hours per `(project, week)` over `window`.
#[instrument(level = "debug", skip_all)]
pub fn project_hours_grid(
    assignments: &[Assignment],
    projects: &[ProjectId],
    window: &WeekWindow,
    config: &EngineConfig,
) -> AggregationGrid<ProjectId, Hours> {
    let hours_per_week = config.hours_per_week;
    let grid = build_grid(
        assignments,
        projects.iter().cloned(),
        window,
        config.strategy,
        Assignment::project_id,
        |_| true,
        |a| a.percent().to_hours(hours_per_week),
    );
    debug!(
        projects = grid.entities().len(),
        weeks = window.len(),
        strategy = ?config.strategy,
        "project hours grid built"
    );
    grid
}

/// Hours per `(trade, week)` for one project. Rows are the project's trades
/// in sorted order.
#[instrument(level = "debug", skip_all)]
pub fn trade_hours_grid(
    assignments: &[Assignment],
    project_id: &ProjectId,
    window: &WeekWindow,
    config: &EngineConfig,
) -> AggregationGrid<Trade, Hours> {
    let trades: BTreeSet<Trade> = assignments
        .iter()
        .filter(|a| a.project_id() == project_id)
        .map(|a| a.trade().clone())
        .collect();
    let hours_per_week = config.hours_per_week;
    build_grid(
        assignments,
        trades,
        window,
        config.strategy,
        Assignment::trade,
        |a| a.project_id() == project_id,
        |a| a.percent().to_hours(hours_per_week),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, classify};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use staff_alloc_core::time::{Day, DayDelta};
    use staff_alloc_model::{
        err::RecordIssue,
        generator::{SnapshotGenConfigBuilder, SnapshotGenerator},
        record::AssignmentRecord,
        snapshot::Snapshot,
    };

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).expect("valid date")
    }

    fn assignment(resource: &str, project: &str, start: Day, end: Day, pct: f64) -> Assignment {
        Assignment::new(
            ResourceId::new(resource),
            ProjectId::new(project),
            start,
            end,
            Percent::new(pct),
        )
        .expect("valid range")
    }

    fn june_week() -> WeekBucket {
        WeekBucket::containing(day(2024, 6, 12))
    }

    #[test]
    fn test_project_hours_scales_percent_to_forty_hour_week() {
        let a = assignment("r1", "p1", day(2024, 6, 1), day(2024, 6, 10), 50.0);
        assert!(overlaps(&a, &june_week()));
        assert_eq!(
            aggregate_project_hours(&[a], &ProjectId::new("p1"), &june_week()),
            Hours::new(20.0)
        );
    }

    #[test]
    fn test_project_hours_with_custom_week_length() {
        let a = assignment("r1", "p1", day(2024, 6, 1), day(2024, 6, 10), 50.0);
        let config = EngineConfig {
            hours_per_week: Hours::new(37.5),
            ..EngineConfig::default()
        };
        assert_eq!(
            aggregate_project_hours_with(&[a], &ProjectId::new("p1"), &june_week(), &config),
            Hours::new(18.75)
        );
    }

    #[test]
    fn test_two_overlapping_assignments_over_allocate() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 10), day(2024, 6, 20), 60.0),
            assignment("r1", "p2", day(2024, 6, 3), day(2024, 6, 13), 70.0),
        ];
        let total = aggregate_resource_percent(&assignments, &ResourceId::new("r1"), &june_week());
        assert_eq!(total, Percent::new(130.0));
        assert_eq!(classify(total), Classification::OverAllocated);
    }

    #[test]
    fn test_other_resources_and_weeks_are_ignored() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 10), day(2024, 6, 20), 60.0),
            assignment("r2", "p1", day(2024, 6, 10), day(2024, 6, 20), 40.0),
            assignment("r1", "p1", day(2024, 7, 1), day(2024, 7, 5), 40.0),
        ];
        assert_eq!(
            aggregate_resource_percent(&assignments, &ResourceId::new("r1"), &june_week()),
            Percent::new(60.0)
        );
        assert_eq!(
            aggregate_resource_percent(&assignments, &ResourceId::new("nobody"), &june_week()),
            Percent::new(0.0)
        );
    }

    #[test]
    fn test_malformed_record_does_not_disturb_valid_one() {
        let records = [
            AssignmentRecord::new("r1", "p1", "2024-06-01", "", 80.0),
            AssignmentRecord::new("r1", "p1", "2024-06-10", "2024-06-12", 30.0),
        ];
        let snapshot = Snapshot::ingest(&records);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.diagnostics().len(), 1);
        assert!(matches!(
            snapshot.diagnostics().as_slice()[0].issue(),
            RecordIssue::MalformedDate(_)
        ));
        assert_eq!(
            aggregate_resource_percent(snapshot.assignments(), &ResourceId::new("r1"), &june_week()),
            Percent::new(30.0)
        );
    }

    #[test]
    fn test_non_numeric_percent_contributes_zero() {
        let records = [
            AssignmentRecord::new("r1", "p1", "2024-06-10", "2024-06-12", "n/a"),
            AssignmentRecord::new("r1", "p1", "2024-06-10", "2024-06-12", 25.0),
        ];
        let snapshot = Snapshot::ingest(&records);
        assert_eq!(snapshot.len(), 2);
        let total =
            aggregate_resource_percent(snapshot.assignments(), &ResourceId::new("r1"), &june_week());
        assert_eq!(total, Percent::new(25.0));
        assert!(!total.value().is_nan());
    }

    #[test]
    fn test_aggregation_is_additive_over_disjoint_sets() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let base = day(2024, 5, 1);
        let all: Vec<Assignment> = (0..60)
            .map(|_| {
                let start = base + DayDelta::new(rng.random_range(0..60));
                let end = start + DayDelta::new(rng.random_range(0..30));
                let pct = f64::from(rng.random_range(0..=20u32) * 5);
                assignment("r1", "p1", start, end, pct)
            })
            .collect();
        let (x, y) = all.split_at(23);
        let r = ResourceId::new("r1");
        for w in WeekWindow::new(base, 12).iter() {
            let whole = aggregate_resource_percent(&all, &r, w);
            let parts = aggregate_resource_percent(x, &r, w) + aggregate_resource_percent(y, &r, w);
            assert_eq!(whole, parts, "week {w}");
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 1), day(2024, 6, 30), 33.3),
            assignment("r1", "p2", day(2024, 6, 11), day(2024, 6, 11), 12.7),
        ];
        let r = ResourceId::new("r1");
        let first = aggregate_resource_percent(&assignments, &r, &june_week());
        for _ in 0..5 {
            let again = aggregate_resource_percent(&assignments, &r, &june_week());
            assert_eq!(first.value().to_bits(), again.value().to_bits());
        }
    }

    #[test]
    fn test_saturday_assignment_counts_in_one_week_only() {
        let saturday = day(2024, 6, 15);
        let a = [assignment("r1", "p1", saturday, saturday, 40.0)];
        let r = ResourceId::new("r1");
        assert_eq!(aggregate_resource_percent(&a, &r, &june_week()), Percent::new(40.0));
        assert_eq!(
            aggregate_resource_percent(&a, &r, &june_week().next()),
            Percent::new(0.0)
        );
    }

    #[test]
    fn test_grid_matches_single_cell_aggregation() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 1), day(2024, 6, 20), 50.0),
            assignment("r2", "p1", day(2024, 6, 16), day(2024, 7, 20), 25.0),
            assignment("r1", "p2", day(2024, 6, 30), day(2024, 6, 30), 100.0),
        ];
        let resources = [ResourceId::new("r1"), ResourceId::new("r2"), ResourceId::new("r1")];
        let window = WeekWindow::new(day(2024, 6, 2), 6);
        let grid = resource_percent_grid(&assignments, &resources, &window, &EngineConfig::default());
        assert_eq!(grid.entities().len(), 2);
        for r in &resources {
            for (i, w) in window.iter().enumerate() {
                assert_eq!(
                    grid.get(r, i),
                    Some(aggregate_resource_percent(&assignments, r, w))
                );
            }
        }
        assert_eq!(grid.row(&ResourceId::new("r3")), None);
        assert_eq!(grid.get(&ResourceId::new("r1"), 6), None);
    }

    #[test]
    fn test_project_grid_row_total() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 9), day(2024, 6, 22), 50.0),
            assignment("r2", "p1", day(2024, 6, 9), day(2024, 6, 15), 100.0),
        ];
        let window = WeekWindow::new(day(2024, 6, 9), 3);
        let grid = project_hours_grid(
            &assignments,
            &[ProjectId::new("p1")],
            &window,
            &EngineConfig::default(),
        );
        let p1 = ProjectId::new("p1");
        assert_eq!(grid.row(&p1), Some(&[Hours::new(60.0), Hours::new(20.0), Hours::new(0.0)][..]));
        assert_eq!(grid.row_total(&p1), Some(Hours::new(80.0)));
    }

    #[test]
    fn test_trade_grid_groups_by_trade_within_project() {
        let assignments = [
            assignment("r1", "p1", day(2024, 6, 9), day(2024, 6, 15), 50.0)
                .with_trade(Trade::new("civil")),
            assignment("r2", "p1", day(2024, 6, 9), day(2024, 6, 15), 25.0),
            assignment("r3", "p2", day(2024, 6, 9), day(2024, 6, 15), 100.0)
                .with_trade(Trade::new("electrical")),
        ];
        let window = WeekWindow::new(day(2024, 6, 9), 1);
        let grid = trade_hours_grid(
            &assignments,
            &ProjectId::new("p1"),
            &window,
            &EngineConfig::default(),
        );
        assert_eq!(grid.entities(), &[Trade::new("civil"), Trade::unspecified()]);
        assert_eq!(grid.get(&Trade::new("civil"), 0), Some(Hours::new(20.0)));
        assert_eq!(grid.get(&Trade::unspecified(), 0), Some(Hours::new(10.0)));
        assert_eq!(grid.row(&Trade::new("electrical")), None);
    }

    #[test]
    fn test_scan_and_indexed_grids_are_bit_identical() {
        for seed in [1, 42, 1234] {
            let config = SnapshotGenConfigBuilder::new()
                .resource_count(12)
                .project_count(5)
                .assignment_count(400)
                .horizon_start(day(2024, 1, 3))
                .horizon_weeks(30)
                .malformed_fraction(0.05)
                .seed(seed)
                .build()
                .expect("valid generator config");
            let records = SnapshotGenerator::new(config).generate();
            let snapshot = Snapshot::ingest(&records);
            let window = WeekWindow::new(day(2023, 12, 20), 40);

            let scan = EngineConfig::default();
            let indexed = EngineConfig {
                strategy: AggregationStrategy::Indexed,
                ..EngineConfig::default()
            };

            let resources = snapshot.resource_ids();
            let a = resource_percent_grid(snapshot.assignments(), &resources, &window, &scan);
            let b = resource_percent_grid(snapshot.assignments(), &resources, &window, &indexed);
            for ((ra, xa), (rb, xb)) in a.rows().zip(b.rows()) {
                assert_eq!(ra, rb);
                let bits_a: Vec<u64> = xa.iter().map(|p| p.value().to_bits()).collect();
                let bits_b: Vec<u64> = xb.iter().map(|p| p.value().to_bits()).collect();
                assert_eq!(bits_a, bits_b, "seed {seed}, resource {ra}");
            }

            let projects = snapshot.project_ids();
            assert_eq!(
                project_hours_grid(snapshot.assignments(), &projects, &window, &scan),
                project_hours_grid(snapshot.assignments(), &projects, &window, &indexed)
            );
        }
    }
}
