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

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotGenConfigBuildError {
    MissingResourceCount,
    MissingProjectCount,
    MissingAssignmentCount,
    MissingHorizonStart,
    MissingHorizonWeeks,
    EmptyHorizon,
    NoResources,
    NoProjects,
    EmptyPercentChoices,
    MalformedFractionOutOfRange(f64),
    TextPercentFractionOutOfRange(f64),
}

impl Display for SnapshotGenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SnapshotGenConfigBuildError::*;
        match self {
            MissingResourceCount => write!(f, "Missing resource_count"),
            MissingProjectCount => write!(f, "Missing project_count"),
            MissingAssignmentCount => write!(f, "Missing assignment_count"),
            MissingHorizonStart => write!(f, "Missing horizon_start"),
            MissingHorizonWeeks => write!(f, "Missing horizon_weeks"),
            EmptyHorizon => write!(f, "horizon_weeks must be at least 1"),
            NoResources => write!(f, "resource_count must be at least 1"),
            NoProjects => write!(f, "project_count must be at least 1"),
            EmptyPercentChoices => write!(f, "percent_choices must not be empty"),
            MalformedFractionOutOfRange(v) => {
                write!(f, "malformed_fraction {v} is outside [0, 1]")
            }
            TextPercentFractionOutOfRange(v) => {
                write!(f, "text_percent_fraction {v} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for SnapshotGenConfigBuildError {}
