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
    assignment::Assignment,
    err::{Diagnostics, MalformedRecordError, RecordRef, SnapshotLoadError},
    id::{AssignmentId, ProjectId, ResourceId},
    record::AssignmentRecord,
};
use serde_json::Value;
use std::{collections::BTreeSet, io::Read};
use tracing::{debug, instrument};

/// An immutable, validated view of the assignment collection at one moment.
///
/// Records are validated once on ingestion. Records that cannot be read or
/// have unusable dates are quarantined (left out of `assignments`) and every
/// issue found is kept in `diagnostics`. A snapshot is never patched; the
/// data layer replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    assignments: Vec<Assignment>,
    diagnostics: Diagnostics,
    record_count: usize,
}

impl Snapshot {
    /// Builds a snapshot from already validated assignments.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        let record_count = assignments.len();
        Self {
            assignments,
            diagnostics: Diagnostics::new(),
            record_count,
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn ingest<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AssignmentRecord>,
    {
        let mut ingestion = Ingestion::default();
        for (position, record) in records.into_iter().enumerate() {
            ingestion.accept(position, record);
        }
        ingestion.finish()
    }

    /// Ingests a parsed JSON array element by element.
    ///
    /// An element that does not deserialize into an [`AssignmentRecord`] is
    /// quarantined with a [`MalformedRecordError`] diagnostic instead of
    /// failing the whole snapshot.
    #[instrument(level = "debug", skip_all)]
    pub fn ingest_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut ingestion = Ingestion::default();
        for (position, value) in values.into_iter().enumerate() {
            let id = value.get("id").and_then(Value::as_str).map(AssignmentId::new);
            match serde_json::from_value::<AssignmentRecord>(value) {
                Ok(record) => ingestion.accept(position, &record),
                Err(e) => ingestion.reject(position, id, MalformedRecordError::new(e.to_string())),
            }
        }
        ingestion.finish()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SnapshotLoadError> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self::ingest_values(values))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotLoadError> {
        let values: Vec<Value> = serde_json::from_reader(reader)?;
        Ok(Self::ingest_values(values))
    }

    #[inline]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[inline]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Number of raw records this snapshot was built from.
    #[inline]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of records left out of every aggregate.
    #[inline]
    pub fn quarantined(&self) -> usize {
        self.record_count - self.assignments.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Distinct resources with at least one accepted assignment, sorted.
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.assignments
            .iter()
            .map(|a| a.resource_id().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct projects with at least one accepted assignment, sorted.
    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.assignments
            .iter()
            .map(|a| a.project_id().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Default)]
struct Ingestion {
    assignments: Vec<Assignment>,
    diagnostics: Diagnostics,
    record_count: usize,
}

impl Ingestion {
    fn accept(&mut self, position: usize, record: &AssignmentRecord) {
        self.record_count += 1;
        let (assignment, issues) = record.validate().into_parts();
        for issue in issues {
            self.diagnostics.push(
                RecordRef::new(Some(position), record.assignment_id()),
                issue,
            );
        }
        self.assignments.extend(assignment);
    }

    fn reject(&mut self, position: usize, id: Option<AssignmentId>, err: MalformedRecordError) {
        self.record_count += 1;
        self.diagnostics.push(RecordRef::new(Some(position), id), err.into());
    }

    fn finish(self) -> Snapshot {
        debug!(
            records = self.record_count,
            accepted = self.assignments.len(),
            diagnostics = self.diagnostics.len(),
            "snapshot ingested"
        );
        Snapshot {
            assignments: self.assignments,
            diagnostics: self.diagnostics,
            record_count: self.record_count,
        }
    }
}

impl AsRef<[Assignment]> for Snapshot {
    fn as_ref(&self) -> &[Assignment] {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::{DateField, RecordIssue};

    #[test]
    fn test_ingest_quarantines_malformed_records_and_keeps_the_rest() {
        let records = vec![
            AssignmentRecord::new("r1", "p1", "2024-06-01", "2024-06-10", 50.0),
            AssignmentRecord::new("r1", "p1", "2024-06-01", "", 30.0),
            AssignmentRecord::new("r2", "p2", "2024-06-10", "2024-06-01", 30.0),
            AssignmentRecord::new("r3", "p2", "2024-06-01", "2024-06-02", "lots"),
        ];
        let snap = Snapshot::ingest(&records);

        assert_eq!(snap.record_count(), 4);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.quarantined(), 2);
        assert_eq!(snap.diagnostics().len(), 3);

        let positions: Vec<_> = snap
            .diagnostics()
            .iter()
            .map(|d| d.record().position())
            .collect();
        assert_eq!(positions, vec![Some(1), Some(2), Some(3)]);
        assert!(matches!(
            snap.diagnostics().as_slice()[1].issue(),
            RecordIssue::InvertedRange(_)
        ));
    }

    #[test]
    fn test_resource_and_project_ids_are_sorted_and_distinct() {
        let records = vec![
            AssignmentRecord::new("zoe", "p2", "2024-06-01", "2024-06-10", 50.0),
            AssignmentRecord::new("adam", "p1", "2024-06-01", "2024-06-10", 50.0),
            AssignmentRecord::new("zoe", "p1", "2024-06-01", "2024-06-10", 50.0),
            AssignmentRecord::new("ghost", "p3", "bad", "2024-06-10", 50.0),
        ];
        let snap = Snapshot::ingest(&records);
        assert_eq!(
            snap.resource_ids(),
            vec![ResourceId::new("adam"), ResourceId::new("zoe")]
        );
        assert_eq!(
            snap.project_ids(),
            vec![ProjectId::new("p1"), ProjectId::new("p2")]
        );
    }

    #[test]
    fn test_from_json_str_rejects_non_array_document() {
        let err = Snapshot::from_json_str(r#"{"resourceId": "r1"}"#).expect_err("not an array");
        assert!(matches!(err, SnapshotLoadError::Json(_)));
    }

    #[test]
    fn test_from_reader_parses_records() {
        let json = br#"[{"resourceId": "r1", "projectId": "p1", "startDate": "2024-06-01",
                         "endDate": "2024-06-10", "allocationPercent": 50}]"#;
        let snap = Snapshot::from_reader(&json[..]).expect("valid document");
        assert_eq!(snap.len(), 1);
        assert!(snap.diagnostics().is_empty());
    }

    #[test]
    fn test_wrong_typed_date_quarantines_only_that_record() {
        let json = r#"[
            {"id": "a1", "resourceId": "r1", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": 50},
            {"id": "a2", "resourceId": "r1", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": 20240610, "allocationPercent": 30}
        ]"#;
        let snap = Snapshot::from_json_str(json).expect("array document");

        assert_eq!(snap.record_count(), 2);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.quarantined(), 1);
        assert_eq!(
            snap.assignments()[0].percent(),
            staff_alloc_core::quantity::Percent::new(50.0)
        );

        let [diag] = snap.diagnostics().as_slice() else {
            panic!("expected one diagnostic");
        };
        assert_eq!(diag.record().position(), Some(1));
        assert_eq!(diag.record().id(), Some(&AssignmentId::new("a2")));
        match diag.issue() {
            RecordIssue::MalformedDate(e) => {
                assert_eq!(e.field(), DateField::End);
                assert_eq!(e.raw(), Some("20240610"));
            }
            other => panic!("unexpected issue {other}"),
        }
    }

    #[test]
    fn test_non_string_identifier_quarantines_only_that_record() {
        let json = r#"[
            {"resourceId": "r1", "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": 50},
            {"id": "a2", "resourceId": 7, "projectId": "p1", "startDate": "2024-06-01",
             "endDate": "2024-06-10", "allocationPercent": 30},
            "not a record"
        ]"#;
        let snap = Snapshot::from_reader(json.as_bytes()).expect("array document");

        assert_eq!(snap.record_count(), 3);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.quarantined(), 2);
        assert_eq!(snap.resource_ids(), vec![ResourceId::new("r1")]);

        let diags = snap.diagnostics().as_slice();
        assert_eq!(diags.len(), 2);
        assert!(matches!(diags[0].issue(), RecordIssue::MalformedRecord(_)));
        assert_eq!(diags[0].record().position(), Some(1));
        assert_eq!(diags[0].record().id(), Some(&AssignmentId::new("a2")));
        assert!(matches!(diags[1].issue(), RecordIssue::MalformedRecord(_)));
        assert_eq!(diags[1].record().position(), Some(2));
        assert_eq!(diags[1].record().id(), None);
    }

    #[test]
    fn test_ingest_does_not_touch_input_records() {
        let records = vec![AssignmentRecord::new("r1", "p1", "2024-06-01", "", 50.0)];
        let before = records.clone();
        let _ = Snapshot::ingest(&records);
        assert_eq!(records, before);
    }
}
