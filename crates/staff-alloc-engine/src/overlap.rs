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

//! Interval overlap between assignments and week buckets.

use staff_alloc_core::week::WeekBucket;
use staff_alloc_model::{
    assignment::Assignment,
    err::{Diagnostics, RecordRef},
    record::AssignmentRecord,
};

/// Closed-interval test: `start <= week.end && end >= week.start`.
#[inline]
pub fn overlaps(assignment: &Assignment, week: &WeekBucket) -> bool {
    assignment.dates().intersects(&week.interval())
}

/// Overlap test for a raw record that has not been ingested.
///
/// The record's dates are validated first. A malformed date or an inverted
/// range yields `false` and a diagnostic rather than a comparison against an
/// unusable value.
pub fn overlaps_record(
    record: &AssignmentRecord,
    week: &WeekBucket,
    diagnostics: &mut Diagnostics,
) -> bool {
    let (assignment, issues) = record.validate().into_parts();
    for issue in issues.into_iter().filter(|i| i.excludes_record()) {
        diagnostics.push(RecordRef::new(None, record.assignment_id()), issue);
    }
    assignment.is_some_and(|a| overlaps(&a, week))
}

#[cfg(test)]
mod tests {
    use super::*;
    use staff_alloc_core::{
        quantity::Percent,
        time::{Day, DayDelta},
    };
    use staff_alloc_model::{
        err::RecordIssue,
        id::{ProjectId, ResourceId},
    };

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).expect("valid date")
    }

    fn assignment(start: Day, end: Day) -> Assignment {
        Assignment::new(
            ResourceId::new("r"),
            ProjectId::new("p"),
            start,
            end,
            Percent::new(50.0),
        )
        .expect("valid range")
    }

    fn week_of(d: Day) -> WeekBucket {
        WeekBucket::containing(d)
    }

    #[test]
    fn test_assignment_reaching_into_week_overlaps() {
        let a = assignment(day(2024, 6, 1), day(2024, 6, 10));
        assert!(overlaps(&a, &week_of(day(2024, 6, 9))));
    }

    #[test]
    fn test_assignment_ending_before_week_does_not_overlap() {
        let a = assignment(day(2024, 6, 1), day(2024, 6, 8));
        assert!(!overlaps(&a, &week_of(day(2024, 6, 9))));
    }

    #[test]
    fn test_assignment_spanning_whole_week_overlaps() {
        let a = assignment(day(2024, 5, 1), day(2024, 7, 1));
        assert!(overlaps(&a, &week_of(day(2024, 6, 9))));
    }

    #[test]
    fn test_single_day_overlaps_exactly_one_week() {
        let start = day(2024, 6, 2);
        for offset in 0..14 {
            let d = day(2024, 6, 9) + DayDelta::new(offset);
            let a = assignment(d, d);
            let hits: Vec<_> = (0..4)
                .map(|i| week_of(start).offset(i))
                .filter(|w| overlaps(&a, w))
                .collect();
            assert_eq!(hits, vec![week_of(d)], "day {d}");
        }
    }

    #[test]
    fn test_saturday_assignment_overlaps_its_week_only() {
        let saturday = day(2024, 6, 15);
        let a = assignment(saturday, saturday);
        let w = week_of(saturday);
        assert!(overlaps(&a, &w));
        assert!(!overlaps(&a, &w.next()));
    }

    #[test]
    fn test_overlaps_matches_closed_interval_formula() {
        let base = day(2024, 6, 1);
        let w = week_of(day(2024, 6, 12));
        for s in 0..30 {
            for len in 0..15 {
                let start = base + DayDelta::new(s);
                let end = start + DayDelta::new(len);
                let expected = start <= w.end() && end >= w.start();
                assert_eq!(overlaps(&assignment(start, end), &w), expected);
            }
        }
    }

    #[test]
    fn test_record_with_empty_end_date_reports_and_does_not_overlap() {
        let rec = AssignmentRecord::new("r", "p", "2024-06-01", "", 50.0);
        let mut diags = Diagnostics::new();
        assert!(!overlaps_record(&rec, &week_of(day(2024, 6, 9)), &mut diags));
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags.as_slice()[0].issue(),
            RecordIssue::MalformedDate(_)
        ));
    }

    #[test]
    fn test_record_with_inverted_range_reports_and_does_not_overlap() {
        let rec = AssignmentRecord::new("r", "p", "2024-06-14", "2024-06-10", 50.0);
        let mut diags = Diagnostics::new();
        assert!(!overlaps_record(&rec, &week_of(day(2024, 6, 9)), &mut diags));
        assert!(matches!(
            diags.as_slice()[0].issue(),
            RecordIssue::InvertedRange(_)
        ));
    }

    #[test]
    fn test_valid_record_overlaps_without_diagnostics() {
        let rec = AssignmentRecord::new("r", "p", "2024-06-01", "2024-06-10", "oops");
        let mut diags = Diagnostics::new();
        assert!(overlaps_record(&rec, &week_of(day(2024, 6, 9)), &mut diags));
        assert!(diags.is_empty());
    }
}
