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

use crate::id::AssignmentId;
use staff_alloc_core::time::Day;
use std::fmt::Display;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Start,
    End,
}

impl Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateField::Start => write!(f, "startDate"),
            DateField::End => write!(f, "endDate"),
        }
    }
}

/// A `startDate` or `endDate` that is missing or not a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MalformedDateError {
    field: DateField,
    raw: Option<String>,
}

impl MalformedDateError {
    #[inline]
    pub fn new(field: DateField, raw: Option<String>) -> Self {
        Self { field, raw }
    }

    #[inline]
    pub fn field(&self) -> DateField {
        self.field
    }

    #[inline]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl Display for MalformedDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{} {:?} is not a calendar date", self.field, raw),
            None => write!(f, "{} is missing", self.field),
        }
    }
}

impl std::error::Error for MalformedDateError {}

/// An `allocationPercent` that is missing, non-numeric or not finite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvalidAllocationError {
    raw: Option<String>,
}

impl InvalidAllocationError {
    #[inline]
    pub fn new(raw: Option<String>) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl Display for InvalidAllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "allocationPercent {} is not numeric; counted as 0", raw),
            None => write!(f, "allocationPercent is missing; counted as 0"),
        }
    }
}

impl std::error::Error for InvalidAllocationError {}

/// A date range whose start lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvertedRangeWarning {
    start: Day,
    end: Day,
}

impl InvertedRangeWarning {
    #[inline]
    pub fn new(start: Day, end: Day) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Day {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Day {
        self.end
    }
}

impl Display for InvertedRangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "startDate {} lies after endDate {}; no week overlaps",
            self.start, self.end
        )
    }
}

impl std::error::Error for InvertedRangeWarning {}

/// A snapshot element that cannot be read as an assignment record at all,
/// such as a non-object or a non-string `resourceId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MalformedRecordError {
    reason: String,
}

impl MalformedRecordError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for MalformedRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not an assignment record: {}", self.reason)
    }
}

impl std::error::Error for MalformedRecordError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordIssue {
    MalformedRecord(MalformedRecordError),
    MalformedDate(MalformedDateError),
    InvalidAllocation(InvalidAllocationError),
    InvertedRange(InvertedRangeWarning),
}

impl RecordIssue {
    /// Whether the record carrying this issue is left out of every aggregate.
    #[inline]
    pub fn excludes_record(&self) -> bool {
        !matches!(self, RecordIssue::InvalidAllocation(_))
    }
}

impl Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordIssue::MalformedRecord(e) => write!(f, "{e}"),
            RecordIssue::MalformedDate(e) => write!(f, "{e}"),
            RecordIssue::InvalidAllocation(e) => write!(f, "{e}"),
            RecordIssue::InvertedRange(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RecordIssue {}

impl From<MalformedRecordError> for RecordIssue {
    fn from(err: MalformedRecordError) -> Self {
        Self::MalformedRecord(err)
    }
}

impl From<MalformedDateError> for RecordIssue {
    fn from(err: MalformedDateError) -> Self {
        Self::MalformedDate(err)
    }
}

impl From<InvalidAllocationError> for RecordIssue {
    fn from(err: InvalidAllocationError) -> Self {
        Self::InvalidAllocation(err)
    }
}

impl From<InvertedRangeWarning> for RecordIssue {
    fn from(err: InvertedRangeWarning) -> Self {
        Self::InvertedRange(err)
    }
}

/// Points at the raw record a diagnostic was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordRef {
    position: Option<usize>,
    id: Option<AssignmentId>,
}

impl RecordRef {
    #[inline]
    pub fn new(position: Option<usize>, id: Option<AssignmentId>) -> Self {
        Self { position, id }
    }

    #[inline]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    #[inline]
    pub fn id(&self) -> Option<&AssignmentId> {
        self.id.as_ref()
    }
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.position, &self.id) {
            (Some(p), Some(id)) => write!(f, "record #{p} ({id})"),
            (Some(p), None) => write!(f, "record #{p}"),
            (None, Some(id)) => write!(f, "record {id}"),
            (None, None) => write!(f, "unidentified record"),
        }
    }
}

/// A non-fatal data-quality finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    record: RecordRef,
    issue: RecordIssue,
}

impl Diagnostic {
    #[inline]
    pub fn new(record: RecordRef, issue: RecordIssue) -> Self {
        Self { record, issue }
    }

    #[inline]
    pub fn record(&self) -> &RecordRef {
        &self.record
    }

    #[inline]
    pub fn issue(&self) -> &RecordIssue {
        &self.issue
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.record, self.issue)
    }
}

/// Collects diagnostics and reports each one as a `warn` event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RecordRef, issue: RecordIssue) {
        warn!(record = %record, issue = %issue, "assignment data-quality issue");
        self.entries.push(Diagnostic::new(record, issue));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Raised when a snapshot document cannot be read at all.
#[derive(Debug)]
pub enum SnapshotLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for SnapshotLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotLoadError::Io(e) => write!(f, "failed to read snapshot: {e}"),
            SnapshotLoadError::Json(e) => {
                write!(f, "snapshot is not an array of assignment records: {e}")
            }
        }
    }
}

impl std::error::Error for SnapshotLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotLoadError::Io(e) => Some(e),
            SnapshotLoadError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SnapshotLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
