//! Speed-banded acceleration segments.

use serde::{Deserialize, Serialize};
use tm_core::units::{Accel, Velocity, cmps2, kmh};

use crate::error::{MotionError, MotionResult};

/// One speed band with a constant acceleration.
///
/// Bounds are in km/h, acceleration in cm/s².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub speed_low_kmh: f64,
    pub speed_high_kmh: f64,
    pub acc_cm_s2: f64,
}

impl Segment {
    /// Create a segment, rejecting `speed_low_kmh >= speed_high_kmh`.
    pub fn new(speed_low_kmh: f64, speed_high_kmh: f64, acc_cm_s2: f64) -> MotionResult<Self> {
        let segment = Self {
            speed_low_kmh,
            speed_high_kmh,
            acc_cm_s2,
        };
        segment.check_range()?;
        Ok(segment)
    }

    fn check_range(&self) -> MotionResult<()> {
        // Written negated so NaN bounds fail too.
        if !(self.speed_low_kmh < self.speed_high_kmh) {
            return Err(MotionError::InvalidRange {
                what: format!(
                    "segment lower bound {} km/h is not below upper bound {} km/h",
                    self.speed_low_kmh, self.speed_high_kmh
                ),
            });
        }
        Ok(())
    }

    /// True when `speed_kmh` lies in `[low, high)`.
    pub fn contains(&self, speed_kmh: f64) -> bool {
        self.speed_low_kmh <= speed_kmh && speed_kmh < self.speed_high_kmh
    }

    pub fn low(&self) -> Velocity {
        kmh(self.speed_low_kmh)
    }

    pub fn high(&self) -> Velocity {
        kmh(self.speed_high_kmh)
    }

    pub fn accel(&self) -> Accel {
        cmps2(self.acc_cm_s2)
    }

    /// Acceleration for a segment the train actually drives through.
    ///
    /// Zero, negative or non-finite values would stall or reverse the
    /// integration, so they are rejected here.
    pub(crate) fn traction_accel(&self) -> MotionResult<Accel> {
        if !(self.acc_cm_s2.is_finite() && self.acc_cm_s2 > 0.0) {
            return Err(MotionError::InvalidParameter {
                name: format!(
                    "acc_cm_s2[{}..{} km/h]",
                    self.speed_low_kmh, self.speed_high_kmh
                ),
                value: self.acc_cm_s2,
                reason: "segment acceleration must be positive".to_string(),
            });
        }
        Ok(self.accel())
    }
}

/// A raw row as supplied by the configuration source; any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSegmentRow {
    pub speed_low_kmh: Option<f64>,
    pub speed_high_kmh: Option<f64>,
    pub acc_cm_s2: Option<f64>,
}

impl RawSegmentRow {
    /// All three fields present and not NaN.
    fn complete(&self) -> Option<(f64, f64, f64)> {
        let present = |v: Option<f64>| v.filter(|x| !x.is_nan());
        Some((
            present(self.speed_low_kmh)?,
            present(self.speed_high_kmh)?,
            present(self.acc_cm_s2)?,
        ))
    }
}

/// Segments sorted ascending by lower bound. Never empty.
///
/// Segments are expected to tile the operating speed range; gaps and
/// overlaps are tolerated, see [`SegmentTable::gaps`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTable {
    segments: Vec<Segment>,
}

impl SegmentTable {
    /// Build a table from raw rows.
    ///
    /// Incomplete rows are dropped. Fails with `EmptyData` when nothing is
    /// left and with `InvalidRange` when any row has `low >= high`.
    pub fn from_rows<I>(rows: I) -> MotionResult<Self>
    where
        I: IntoIterator<Item = RawSegmentRow>,
    {
        let segments = rows
            .into_iter()
            .filter_map(|row| row.complete())
            .map(|(low, high, acc)| Segment {
                speed_low_kmh: low,
                speed_high_kmh: high,
                acc_cm_s2: acc,
            })
            .collect();
        Self::new(segments)
    }

    /// Build a table from already-complete segments.
    pub fn new(mut segments: Vec<Segment>) -> MotionResult<Self> {
        if segments.is_empty() {
            return Err(MotionError::EmptyData {
                what: "segment table has no complete rows".to_string(),
            });
        }
        for segment in &segments {
            segment.check_range()?;
        }
        segments.sort_by(|a, b| a.speed_low_kmh.total_cmp(&b.speed_low_kmh));
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Lowest lower bound and highest upper bound, in km/h.
    pub fn coverage(&self) -> (f64, f64) {
        let low = self.segments[0].speed_low_kmh;
        let high = self
            .segments
            .iter()
            .map(|s| s.speed_high_kmh)
            .fold(f64::NEG_INFINITY, f64::max);
        (low, high)
    }

    /// Holes between consecutive segments as `(from_kmh, to_kmh)` pairs.
    pub fn gaps(&self) -> Vec<(f64, f64)> {
        self.segments
            .windows(2)
            .filter(|pair| pair[1].speed_low_kmh > pair[0].speed_high_kmh)
            .map(|pair| (pair[0].speed_high_kmh, pair[1].speed_low_kmh))
            .collect()
    }

    /// Index of the first segment whose upper bound lies above `speed_kmh`.
    ///
    /// Binary search on the upper bounds; exact for non-overlapping tables.
    pub fn first_above(&self, speed_kmh: f64) -> usize {
        self.segments
            .partition_point(|s| s.speed_high_kmh <= speed_kmh)
    }

    /// Segment whose `[low, high)` band contains `speed_kmh`.
    pub fn segment_for(&self, speed_kmh: f64) -> Option<&Segment> {
        self.segments
            .get(self.first_above(speed_kmh))
            .filter(|s| s.contains(speed_kmh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(low: f64, high: f64, acc: f64) -> RawSegmentRow {
        RawSegmentRow {
            speed_low_kmh: Some(low),
            speed_high_kmh: Some(high),
            acc_cm_s2: Some(acc),
        }
    }

    #[test]
    fn rows_are_sorted_by_lower_bound() {
        let table = SegmentTable::from_rows([
            row(80.0, 120.0, 27.8),
            row(0.0, 40.0, 83.3),
            row(40.0, 80.0, 55.6),
        ])
        .unwrap();
        let lows: Vec<f64> = table.iter().map(|s| s.speed_low_kmh).collect();
        assert_eq!(lows, vec![0.0, 40.0, 80.0]);
        assert_eq!(table.coverage(), (0.0, 120.0));
        assert!(table.gaps().is_empty());
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let table = SegmentTable::from_rows([
            row(0.0, 40.0, 83.3),
            RawSegmentRow {
                speed_low_kmh: Some(40.0),
                speed_high_kmh: None,
                acc_cm_s2: Some(55.6),
            },
            row(40.0, f64::NAN, 55.6),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = SegmentTable::from_rows(Vec::<RawSegmentRow>::new()).unwrap_err();
        assert!(matches!(err, MotionError::EmptyData { .. }));

        let err = SegmentTable::from_rows([RawSegmentRow::default()]).unwrap_err();
        assert!(matches!(err, MotionError::EmptyData { .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = SegmentTable::from_rows([row(0.0, 40.0, 83.3), row(60.0, 60.0, 50.0)])
            .unwrap_err();
        assert!(matches!(err, MotionError::InvalidRange { .. }));

        assert!(Segment::new(50.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn gaps_are_reported_not_rejected() {
        let table =
            SegmentTable::from_rows([row(0.0, 40.0, 83.3), row(50.0, 80.0, 55.6)]).unwrap();
        assert_eq!(table.gaps(), vec![(40.0, 50.0)]);
    }

    #[test]
    fn segment_lookup() {
        let table = SegmentTable::from_rows([
            row(0.0, 40.0, 83.3),
            row(40.0, 80.0, 55.6),
            row(80.0, 120.0, 27.8),
        ])
        .unwrap();
        assert_eq!(table.segment_for(0.0).unwrap().acc_cm_s2, 83.3);
        assert_eq!(table.segment_for(40.0).unwrap().acc_cm_s2, 55.6);
        assert_eq!(table.segment_for(119.9).unwrap().acc_cm_s2, 27.8);
        assert!(table.segment_for(120.0).is_none());
        assert_eq!(table.first_above(40.0), 1);
        assert_eq!(table.first_above(500.0), 3);
    }

    #[test]
    fn traction_accel_rejects_non_positive() {
        let seg = Segment::new(0.0, 40.0, 0.0).unwrap();
        assert!(matches!(
            seg.traction_accel(),
            Err(MotionError::InvalidParameter { .. })
        ));
        let seg = Segment::new(0.0, 40.0, 50.0).unwrap();
        assert!((seg.traction_accel().unwrap().value - 0.5).abs() < 1e-12);
    }
}
