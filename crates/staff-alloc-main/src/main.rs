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

use serde::Serialize;
use staff_alloc_core::time::Day;
use staff_alloc_engine::prelude::*;
use staff_alloc_model::prelude::*;
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    process::ExitCode,
    time::Instant,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotReport {
    today: Day,
    record_count: usize,
    quarantined: usize,
    diagnostics: Vec<String>,
    roster: RosterSummary,
    workload: WorkloadGrid,
    hour_curves: Vec<HourCurve>,
}

#[derive(Debug, Clone, Serialize)]
struct InstanceInfo {
    idx: usize,
    seed: u64,
    resource_count: usize,
    project_count: usize,
    assignment_count: usize,
    accepted: usize,
    diagnostics: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    instance: InstanceInfo,
    weeks: usize,
    scan_elapsed_us: u128,
    indexed_elapsed_us: u128,
    over_allocated_cells: usize,
}

#[derive(Debug, Clone, Serialize)]
struct BenchmarkReport {
    description: String,
    instances: Vec<RunResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn report_snapshot(path: &str, today: Day) -> Result<SnapshotReport, SnapshotLoadError> {
    let snapshot = Snapshot::from_reader(BufReader::new(File::open(path)?))?;
    info!(
        path,
        records = snapshot.record_count(),
        accepted = snapshot.len(),
        quarantined = snapshot.quarantined(),
        "snapshot loaded"
    );

    let config = EngineConfig::default();
    let views = ViewConfig::default();
    let cursor = WeekCursor::new(today);

    let roster = RosterSummary::build(&snapshot, &snapshot.resource_ids(), today, &config);
    let workload = WorkloadGrid::build(&snapshot, cursor, views.workload_weeks, &config);
    let hour_curves = snapshot
        .project_ids()
        .iter()
        .map(|p| HourCurve::build(&snapshot, p, cursor, views.curve_weeks, &config))
        .collect();

    Ok(SnapshotReport {
        today,
        record_count: snapshot.record_count(),
        quarantined: snapshot.quarantined(),
        diagnostics: snapshot.diagnostics().iter().map(|d| d.to_string()).collect(),
        roster,
        workload,
        hour_curves,
    })
}

fn run_benchmark() -> BenchmarkReport {
    let n_instances = 8usize;

    let min_resources = 20usize;
    let max_resources = 400usize;
    let min_projects = 5usize;
    let max_projects = 60usize;
    let min_assignments = 100usize;
    let max_assignments = 20_000usize;

    let horizon_start = Day::today();
    let weeks = ViewConfig::default().workload_weeks;
    let window = WeekWindow::new(horizon_start, weeks);

    let scan = EngineConfig::default();
    let indexed = EngineConfig {
        strategy: AggregationStrategy::Indexed,
        ..EngineConfig::default()
    };

    let mut results = Vec::with_capacity(n_instances);
    for i in 0..n_instances {
        let resource_count = interpolate_u(min_resources, max_resources, i, n_instances);
        let project_count = interpolate_u(min_projects, max_projects, i, n_instances);
        let assignment_count = interpolate_u(min_assignments, max_assignments, i, n_instances);
        let seed: u64 = 42 + (i as u64);

        let cfg = SnapshotGenConfigBuilder::new()
            .resource_count(resource_count)
            .project_count(project_count)
            .assignment_count(assignment_count)
            .horizon_start(horizon_start)
            .horizon_weeks(26)
            .malformed_fraction(0.01)
            .seed(seed)
            .build()
            .expect("valid generator config");
        let mut generator: SnapshotGenerator = cfg.into();
        let records = generator.generate();
        let snapshot = Snapshot::ingest(&records);
        let resources = snapshot.resource_ids();

        let t0 = Instant::now();
        let scan_grid = resource_percent_grid(snapshot.assignments(), &resources, &window, &scan);
        let scan_elapsed = t0.elapsed();

        let t1 = Instant::now();
        let indexed_grid =
            resource_percent_grid(snapshot.assignments(), &resources, &window, &indexed);
        let indexed_elapsed = t1.elapsed();

        assert_eq!(scan_grid, indexed_grid, "strategies disagree on instance {i}");

        let over_allocated_cells = scan_grid
            .rows()
            .flat_map(|(_, row)| row.iter())
            .filter(|&&p| classify(p).is_over_allocated())
            .count();

        info!(
            instance = i,
            assignments = assignment_count,
            scan_us = scan_elapsed.as_micros() as u64,
            indexed_us = indexed_elapsed.as_micros() as u64,
            "instance done"
        );

        results.push(RunResult {
            instance: InstanceInfo {
                idx: i,
                seed,
                resource_count,
                project_count,
                assignment_count,
                accepted: snapshot.len(),
                diagnostics: snapshot.diagnostics().len(),
            },
            weeks,
            scan_elapsed_us: scan_elapsed.as_micros(),
            indexed_elapsed_us: indexed_elapsed.as_micros(),
            over_allocated_cells,
        });
    }

    BenchmarkReport {
        description: format!(
            "Weekly allocation grid: {n_instances} synthetic snapshots from small to big; scan vs indexed aggregation over {weeks} weeks."
        ),
        instances: results,
    }
}

fn main() -> ExitCode {
    enable_tracing();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        let report = run_benchmark();
        let file = File::create("alloc_bench.json").expect("create alloc_bench.json");
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");
        println!("Wrote: alloc_bench.json");
        return ExitCode::SUCCESS;
    };

    let today = match args.next() {
        Some(raw) => match Day::parse(&raw) {
            Ok(day) => day,
            Err(e) => {
                error!(error = %e, "invalid reference day");
                return ExitCode::FAILURE;
            }
        },
        None => Day::today(),
    };

    match report_snapshot(&path, today) {
        Ok(report) => {
            let stdout = std::io::stdout().lock();
            if let Err(e) = serde_json::to_writer_pretty(stdout, &report) {
                error!(error = %e, "failed to write report");
                return ExitCode::FAILURE;
            }
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, path = %path, "failed to load snapshot");
            ExitCode::FAILURE
        }
    }
}
