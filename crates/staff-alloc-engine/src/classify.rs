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
use staff_alloc_core::quantity::Percent;
use std::fmt::Display;

/// Presentation label for a resource's total in one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Normal,
    OverAllocated,
}

impl Classification {
    #[inline]
    pub fn is_over_allocated(self) -> bool {
        self == Classification::OverAllocated
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Normal => write!(f, "Normal"),
            Classification::OverAllocated => write!(f, "OverAllocated"),
        }
    }
}

/// `OverAllocated` strictly above a full week (100%), `Normal` otherwise.
#[inline]
pub fn classify(percent: Percent) -> Classification {
    classify_with(percent, Percent::FULL)
}

#[inline]
pub fn classify_with(percent: Percent, threshold: Percent) -> Classification {
    if percent > threshold {
        Classification::OverAllocated
    } else {
        Classification::Normal
    }
}
