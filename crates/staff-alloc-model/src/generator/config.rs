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

use super::err::SnapshotGenConfigBuildError;
use rand::Rng;
use staff_alloc_core::time::Day;
use std::fmt::Display;

/// Configuration for synthetic snapshot generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotGenConfig {
    pub(crate) resource_count: usize,
    pub(crate) project_count: usize,
    pub(crate) assignment_count: usize,
    pub(crate) horizon_start: Day,
    pub(crate) horizon_weeks: u32,

    pub(crate) duration_mean_days: f64,
    pub(crate) duration_sigma_days: f64,
    pub(crate) min_duration_days: i64,
    pub(crate) max_duration_days: i64,

    pub(crate) percent_choices: Vec<f64>,
    pub(crate) text_percent_fraction: f64,
    pub(crate) trades: Vec<String>,
    pub(crate) malformed_fraction: f64,

    pub(crate) seed: u64,
}

impl SnapshotGenConfig {
    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }
    #[inline]
    pub fn project_count(&self) -> usize {
        self.project_count
    }
    #[inline]
    pub fn assignment_count(&self) -> usize {
        self.assignment_count
    }
    #[inline]
    pub fn horizon_start(&self) -> Day {
        self.horizon_start
    }
    #[inline]
    pub fn horizon_weeks(&self) -> u32 {
        self.horizon_weeks
    }
    #[inline]
    pub fn duration_mean_days(&self) -> f64 {
        self.duration_mean_days
    }
    #[inline]
    pub fn duration_sigma_days(&self) -> f64 {
        self.duration_sigma_days
    }
    #[inline]
    pub fn percent_choices(&self) -> &[f64] {
        &self.percent_choices
    }
    #[inline]
    pub fn trades(&self) -> &[String] {
        &self.trades
    }
    #[inline]
    pub fn malformed_fraction(&self) -> f64 {
        self.malformed_fraction
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for SnapshotGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SnapshotGenConfig {{ resources: {}, projects: {}, assignments: {}, \
             horizon_start: {}, horizon_weeks: {}, duration_mean_days: {:.1}, \
             duration_sigma_days: {:.1}, min_duration_days: {}, max_duration_days: {}, \
             text_percent_fraction: {:.3}, malformed_fraction: {:.3}, seed: {} }}",
            self.resource_count,
            self.project_count,
            self.assignment_count,
            self.horizon_start,
            self.horizon_weeks,
            self.duration_mean_days,
            self.duration_sigma_days,
            self.min_duration_days,
            self.max_duration_days,
            self.text_percent_fraction,
            self.malformed_fraction,
            self.seed
        )
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotGenConfigBuilder {
    resource_count: Option<usize>,
    project_count: Option<usize>,
    assignment_count: Option<usize>,
    horizon_start: Option<Day>,
    horizon_weeks: Option<u32>,

    duration_mean_days: f64,
    duration_sigma_days: f64,
    min_duration_days: i64,
    max_duration_days: i64,
    percent_choices: Vec<f64>,
    text_percent_fraction: f64,
    trades: Vec<String>,
    malformed_fraction: f64,
    seed: u64,
}

impl Default for SnapshotGenConfigBuilder {
    fn default() -> Self {
        Self {
            resource_count: None,
            project_count: None,
            assignment_count: None,
            horizon_start: None,
            horizon_weeks: None,

            duration_mean_days: 28.0,
            duration_sigma_days: 14.0,
            min_duration_days: 1,
            max_duration_days: 180,
            percent_choices: vec![10.0, 20.0, 25.0, 40.0, 50.0, 60.0, 75.0, 80.0, 100.0],
            text_percent_fraction: 0.1,
            trades: ["electrical", "mechanical", "civil", "controls"]
                .into_iter()
                .map(String::from)
                .collect(),
            malformed_fraction: 0.0,
            seed: rand::rng().random(),
        }
    }
}

impl SnapshotGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn resource_count(mut self, v: usize) -> Self {
        self.resource_count = Some(v);
        self
    }
    #[inline]
    pub fn project_count(mut self, v: usize) -> Self {
        self.project_count = Some(v);
        self
    }
    #[inline]
    pub fn assignment_count(mut self, v: usize) -> Self {
        self.assignment_count = Some(v);
        self
    }
    #[inline]
    pub fn horizon_start(mut self, v: Day) -> Self {
        self.horizon_start = Some(v);
        self
    }
    #[inline]
    pub fn horizon_weeks(mut self, v: u32) -> Self {
        self.horizon_weeks = Some(v);
        self
    }
    #[inline]
    pub fn duration_days(mut self, mean: f64, sigma: f64) -> Self {
        self.duration_mean_days = mean;
        self.duration_sigma_days = sigma;
        self
    }
    pub fn duration_range(mut self, min: i64, max: i64) -> Self {
        self.min_duration_days = min.max(1);
        self.max_duration_days = max.max(self.min_duration_days);
        self
    }
    pub fn percent_choices(mut self, v: Vec<f64>) -> Self {
        self.percent_choices = v;
        self
    }
    #[inline]
    pub fn text_percent_fraction(mut self, v: f64) -> Self {
        self.text_percent_fraction = v;
        self
    }
    pub fn trades<S: Into<String>>(mut self, v: impl IntoIterator<Item = S>) -> Self {
        self.trades = v.into_iter().map(Into::into).collect();
        self
    }
    #[inline]
    pub fn malformed_fraction(mut self, v: f64) -> Self {
        self.malformed_fraction = v;
        self
    }
    pub fn random_seed(mut self) -> Self {
        self.seed = rand::rng().random();
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<SnapshotGenConfig, SnapshotGenConfigBuildError> {
        use SnapshotGenConfigBuildError::*;
        let resource_count = self.resource_count.ok_or(MissingResourceCount)?;
        let project_count = self.project_count.ok_or(MissingProjectCount)?;
        let assignment_count = self.assignment_count.ok_or(MissingAssignmentCount)?;
        let horizon_start = self.horizon_start.ok_or(MissingHorizonStart)?;
        let horizon_weeks = self.horizon_weeks.ok_or(MissingHorizonWeeks)?;

        if resource_count == 0 {
            return Err(NoResources);
        }
        if project_count == 0 {
            return Err(NoProjects);
        }
        if horizon_weeks == 0 {
            return Err(EmptyHorizon);
        }
        if self.percent_choices.is_empty() {
            return Err(EmptyPercentChoices);
        }
        if !(0.0..=1.0).contains(&self.malformed_fraction) {
            return Err(MalformedFractionOutOfRange(self.malformed_fraction));
        }
        if !(0.0..=1.0).contains(&self.text_percent_fraction) {
            return Err(TextPercentFractionOutOfRange(self.text_percent_fraction));
        }

        Ok(SnapshotGenConfig {
            resource_count,
            project_count,
            assignment_count,
            horizon_start,
            horizon_weeks,
            duration_mean_days: self.duration_mean_days,
            duration_sigma_days: self.duration_sigma_days.max(0.0),
            min_duration_days: self.min_duration_days,
            max_duration_days: self.max_duration_days,
            percent_choices: self.percent_choices,
            text_percent_fraction: self.text_percent_fraction,
            trades: self.trades,
            malformed_fraction: self.malformed_fraction,
            seed: self.seed,
        })
    }
}
