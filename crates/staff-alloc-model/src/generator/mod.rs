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

//! Synthetic assignment snapshots for benchmarks and demos.
//!
//! The generator draws assignment starts uniformly over a horizon of whole
//! weeks, durations from a clamped normal distribution and percents from a
//! fixed set of choices. A configurable fraction of records is corrupted the
//! way real feeds go wrong (empty end date, text percent, inverted range).

mod config;
mod err;

pub use config::{SnapshotGenConfig, SnapshotGenConfigBuilder};
pub use err::SnapshotGenConfigBuildError;

use crate::record::{AssignmentRecord, RawPercent};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal};
use staff_alloc_core::{time::DayDelta, week::DAYS_PER_WEEK};
use tracing::debug;

pub struct SnapshotGenerator {
    config: SnapshotGenConfig,
    rng: SmallRng,
    duration_distribution: Option<Normal<f64>>,
    next_id: u64,
}

impl From<SnapshotGenConfig> for SnapshotGenerator {
    fn from(config: SnapshotGenConfig) -> Self {
        Self::new(config)
    }
}

impl SnapshotGenerator {
    pub fn new(config: SnapshotGenConfig) -> Self {
        let duration_distribution =
            Normal::new(config.duration_mean_days, config.duration_sigma_days).ok();
        Self {
            rng: SmallRng::seed_from_u64(config.seed()),
            config,
            duration_distribution,
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SnapshotGenConfig {
        &self.config
    }

    #[inline]
    fn fresh_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        format!("A{id:05}")
    }

    fn sample_duration_days(&mut self) -> i64 {
        let raw = match &self.duration_distribution {
            Some(d) => d.sample(&mut self.rng),
            None => self.config.duration_mean_days,
        };
        let days = if raw.is_finite() { raw.round() as i64 } else { 1 };
        days.clamp(self.config.min_duration_days, self.config.max_duration_days)
    }

    fn sample_percent(&mut self) -> RawPercent {
        let choices = &self.config.percent_choices;
        let percent = choices[self.rng.random_range(0..choices.len())];
        if self.rng.random_bool(self.config.text_percent_fraction) {
            RawPercent::Text(percent.to_string())
        } else {
            RawPercent::Number(percent)
        }
    }

    fn sample_trade(&mut self) -> Option<String> {
        if self.config.trades.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.config.trades.len());
        Some(self.config.trades[idx].clone())
    }

    fn corrupt(&mut self, record: &mut AssignmentRecord) {
        match self.rng.random_range(0..3) {
            0 => record.end_date = Some(String::new()),
            1 => record.allocation_percent = Some(RawPercent::Text("n/a".into())),
            _ if record.start_date != record.end_date => {
                std::mem::swap(&mut record.start_date, &mut record.end_date);
            }
            _ => record.start_date = Some("TBD".into()),
        }
    }

    /// Generates one snapshot's worth of raw records.
    pub fn generate(&mut self) -> Vec<AssignmentRecord> {
        let horizon_days = i64::from(self.config.horizon_weeks) * DAYS_PER_WEEK;
        let mut records = Vec::with_capacity(self.config.assignment_count);
        let mut corrupted = 0usize;

        for _ in 0..self.config.assignment_count {
            let resource = self.rng.random_range(0..self.config.resource_count);
            let project = self.rng.random_range(0..self.config.project_count);
            let offset = DayDelta::new(self.rng.random_range(0..horizon_days));
            let start = self.config.horizon_start + offset;
            let end = start + DayDelta::new(self.sample_duration_days() - 1);

            let mut record = AssignmentRecord {
                id: Some(self.fresh_id()),
                resource_id: format!("R{resource:03}"),
                project_id: format!("P{project:02}"),
                start_date: Some(start.to_string()),
                end_date: Some(end.to_string()),
                allocation_percent: Some(self.sample_percent()),
                trade: self.sample_trade(),
                activity: None,
            };

            if self.rng.random_bool(self.config.malformed_fraction) {
                self.corrupt(&mut record);
                corrupted += 1;
            }
            records.push(record);
        }

        debug!(records = records.len(), corrupted, "generated synthetic snapshot");
        records
    }
}
