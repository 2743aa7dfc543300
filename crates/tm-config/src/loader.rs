//! Turn a document into the engine's input tables.

use std::collections::BTreeMap;

use tm_profile::{MotionResult, ParameterSet, RawSegmentRow, SegmentTable};

use crate::schema::ProfileDocument;

/// Validated, sorted segment table.
///
/// Fails with `EmptyData` or `InvalidRange`.
pub fn load_segments(doc: &ProfileDocument) -> MotionResult<SegmentTable> {
    SegmentTable::from_rows(doc.segments.iter().map(RawSegmentRow::from))
}

/// The eight required parameters.
///
/// Null entries count as missing; every missing key is reported at once.
pub fn load_parameters(doc: &ProfileDocument) -> MotionResult<ParameterSet> {
    let present: BTreeMap<String, f64> = doc
        .parameters
        .iter()
        .filter_map(|(name, value)| value.map(|v| (name.clone(), v)))
        .collect();
    ParameterSet::from_map(&present)
}
