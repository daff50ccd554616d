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

//! Raw assignment records as delivered by the external data layer.
//!
//! Records are loosely typed: dates arrive as strings that may be empty,
//! missing or of the wrong JSON type, and `allocationPercent` may be a
//! number, a numeric string or something else entirely.
//! [`AssignmentRecord::validate`] turns a record into a typed [`Assignment`]
//! plus the issues found on the way.

use crate::{
    assignment::Assignment,
    err::{DateField, InvalidAllocationError, MalformedDateError, RecordIssue},
    id::{AssignmentId, ProjectId, ResourceId, Trade},
};
use serde::{Deserialize, Deserializer, Serialize};
use staff_alloc_core::{quantity::Percent, time::Day};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPercent {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawPercent {
    /// The numeric value, or `None` when the raw value is not a finite number
    /// or a string holding one.
    pub fn to_percent(&self) -> Option<Percent> {
        let value = match self {
            RawPercent::Number(v) => *v,
            RawPercent::Text(s) => s.trim().parse::<f64>().ok()?,
            RawPercent::Other(_) => return None,
        };
        value.is_finite().then_some(Percent::new(value))
    }

    fn describe(&self) -> String {
        match self {
            RawPercent::Number(v) => v.to_string(),
            RawPercent::Text(s) => format!("{s:?}"),
            RawPercent::Other(v) => v.to_string(),
        }
    }
}

impl From<f64> for RawPercent {
    fn from(v: f64) -> Self {
        RawPercent::Number(v)
    }
}

impl From<&str> for RawPercent {
    fn from(s: &str) -> Self {
        RawPercent::Text(s.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub resource_id: String,
    pub project_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub allocation_percent: Option<RawPercent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

/// Reads a date slot of any JSON type. Strings pass through, `null` is
/// missing, anything else keeps its JSON text so validation can reject it.
fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// The result of validating one record.
///
/// `assignment` is `None` exactly when one of `issues` excludes the record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    assignment: Option<Assignment>,
    issues: Vec<RecordIssue>,
}

impl RecordOutcome {
    #[inline]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    #[inline]
    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.assignment.is_none()
    }

    #[inline]
    pub fn into_parts(self) -> (Option<Assignment>, Vec<RecordIssue>) {
        (self.assignment, self.issues)
    }
}

fn parse_date(field: DateField, raw: Option<&str>) -> Result<Day, MalformedDateError> {
    let raw = raw.ok_or(MalformedDateError::new(field, None))?;
    Day::parse(raw).map_err(|e| MalformedDateError::new(field, Some(e.raw().to_owned())))
}

impl AssignmentRecord {
    pub fn new(
        resource_id: impl Into<String>,
        project_id: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        allocation_percent: impl Into<RawPercent>,
    ) -> Self {
        Self {
            id: None,
            resource_id: resource_id.into(),
            project_id: project_id.into(),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            allocation_percent: Some(allocation_percent.into()),
            trade: None,
            activity: None,
        }
    }

    #[inline]
    pub fn assignment_id(&self) -> Option<AssignmentId> {
        self.id.as_deref().map(AssignmentId::new)
    }

    /// Validates the record.
    ///
    /// Both dates are checked so that a record with two bad dates reports
    /// both. A non-numeric percent is coerced to zero and reported without
    /// excluding the record.
    pub fn validate(&self) -> RecordOutcome {
        let mut issues = Vec::new();

        let start = parse_date(DateField::Start, self.start_date.as_deref());
        let end = parse_date(DateField::End, self.end_date.as_deref());

        let percent = match &self.allocation_percent {
            Some(raw) => raw.to_percent().unwrap_or_else(|| {
                issues.push(InvalidAllocationError::new(Some(raw.describe())).into());
                Percent::new(0.0)
            }),
            None => {
                issues.push(InvalidAllocationError::new(None).into());
                Percent::new(0.0)
            }
        };

        let (start, end) = match (start, end) {
            (Ok(start), Ok(end)) => (start, end),
            (start, end) => {
                issues.extend(start.err().map(RecordIssue::from));
                issues.extend(end.err().map(RecordIssue::from));
                return RecordOutcome {
                    assignment: None,
                    issues,
                };
            }
        };

        let assignment = match Assignment::new(
            ResourceId::new(self.resource_id.as_str()),
            ProjectId::new(self.project_id.as_str()),
            start,
            end,
            percent,
        ) {
            Ok(a) => a,
            Err(warning) => {
                issues.push(warning.into());
                return RecordOutcome {
                    assignment: None,
                    issues,
                };
            }
        };

        let mut assignment = match &self.trade {
            Some(trade) if !trade.trim().is_empty() => assignment.with_trade(Trade::new(trade.trim())),
            _ => assignment,
        };
        if let Some(id) = self.assignment_id() {
            assignment = assignment.with_id(id);
        }
        if let Some(activity) = &self.activity {
            assignment = assignment.with_activity(activity.as_str());
        }

        RecordOutcome {
            assignment: Some(assignment),
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).expect("valid date")
    }

    #[test]
    fn test_validate_well_formed_record() {
        let rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", 50.0);
        let out = rec.validate();
        assert!(out.issues().is_empty());
        let a = out.assignment().expect("valid");
        assert_eq!(a.start(), day(2024, 6, 1));
        assert_eq!(a.end(), day(2024, 6, 10));
        assert_eq!(a.percent(), Percent::new(50.0));
        assert_eq!(a.resource_id(), &ResourceId::new("r1"));
    }

    #[test]
    fn test_empty_end_date_excludes_record() {
        let rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "", 50.0);
        let out = rec.validate();
        assert!(out.is_excluded());
        assert_eq!(
            out.issues(),
            &[RecordIssue::MalformedDate(MalformedDateError::new(
                DateField::End,
                Some(String::new())
            ))]
        );
    }

    #[test]
    fn test_missing_dates_report_both_fields() {
        let mut rec = AssignmentRecord::new("r1", "p1", "x", "y", 50.0);
        rec.start_date = None;
        rec.end_date = None;
        let out = rec.validate();
        assert!(out.is_excluded());
        assert_eq!(out.issues().len(), 2);
    }

    #[test]
    fn test_text_percent_is_parsed() {
        let rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", " 75 ");
        let out = rec.validate();
        assert!(out.issues().is_empty());
        assert_eq!(out.assignment().unwrap().percent(), Percent::new(75.0));
    }

    #[test]
    fn test_non_numeric_percent_is_zeroed_and_reported() {
        let rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", "n/a");
        let out = rec.validate();
        assert!(!out.is_excluded());
        assert_eq!(out.assignment().unwrap().percent(), Percent::new(0.0));
        assert!(matches!(out.issues(), [RecordIssue::InvalidAllocation(_)]));
    }

    #[test]
    fn test_missing_percent_is_zeroed_and_reported() {
        let mut rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", 10.0);
        rec.allocation_percent = None;
        let out = rec.validate();
        assert_eq!(out.assignment().unwrap().percent(), Percent::new(0.0));
        assert_eq!(
            out.issues(),
            &[RecordIssue::InvalidAllocation(InvalidAllocationError::new(None))]
        );
    }

    #[test]
    fn test_inverted_range_is_excluded_with_warning() {
        let rec = AssignmentRecord::new("r1", "p1", "2024-06-10", "2024-06-01", 10.0);
        let out = rec.validate();
        assert!(out.is_excluded());
        assert!(matches!(out.issues(), [RecordIssue::InvertedRange(_)]));
    }

    #[test]
    fn test_deserialize_camel_case_with_mixed_percent_types() {
        let json = r#"[
            {"id": "a1", "resourceId": "r1", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": 50, "trade": "civil", "activity": "pour"},
            {"resourceId": "r2", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": "25"},
            {"resourceId": "r3", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": true},
            {"resourceId": "r4", "projectId": "p1", "allocationPercent": null}
        ]"#;
        let records: Vec<AssignmentRecord> = serde_json::from_str(json).expect("parses");
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].allocation_percent, Some(RawPercent::Number(50.0)));
        assert_eq!(records[1].allocation_percent, Some(RawPercent::Text("25".into())));
        assert!(matches!(records[2].allocation_percent, Some(RawPercent::Other(_))));
        assert_eq!(records[3].allocation_percent, None);
        assert_eq!(records[3].start_date, None);

        let a = records[0].validate().into_parts().0.expect("valid");
        assert_eq!(a.trade(), &Trade::new("civil"));
        assert_eq!(a.activity(), Some("pour"));
        assert_eq!(a.id(), Some(&AssignmentId::new("a1")));
    }

    #[test]
    fn test_wrong_typed_dates_deserialize_and_fail_validation() {
        let json = r#"{"resourceId": "r1", "projectId": "p1", "startDate": {"y": 2024},
            "endDate": 20240610, "allocationPercent": 30}"#;
        let rec: AssignmentRecord = serde_json::from_str(json).expect("parses");
        assert_eq!(rec.start_date.as_deref(), Some(r#"{"y":2024}"#));
        assert_eq!(rec.end_date.as_deref(), Some("20240610"));

        let out = rec.validate();
        assert!(out.is_excluded());
        assert_eq!(
            out.issues(),
            &[
                RecordIssue::MalformedDate(MalformedDateError::new(
                    DateField::Start,
                    Some(r#"{"y":2024}"#.into())
                )),
                RecordIssue::MalformedDate(MalformedDateError::new(
                    DateField::End,
                    Some("20240610".into())
                )),
            ]
        );
    }

    #[test]
    fn test_blank_trade_falls_back_to_unspecified() {
        let mut rec = AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", 10.0);
        rec.trade = Some("   ".into());
        assert!(rec.validate().assignment().unwrap().trade().is_unspecified());
    }
}
