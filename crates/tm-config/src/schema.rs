//! Profile document schema.
//!
//! A document mirrors the two tables of a spreadsheet export:
//! `segments` (speed bands) and `parameters` (named scalars).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tm_profile::{EngineOptions, RawSegmentRow};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDocument {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub segments: Vec<SegmentRowDef>,
    /// Null values count as absent.
    #[serde(default)]
    pub parameters: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub options: EngineOptions,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SegmentRowDef {
    #[serde(default)]
    pub speed_low_kmh: Option<f64>,
    #[serde(default)]
    pub speed_high_kmh: Option<f64>,
    #[serde(default)]
    pub acc_cm_s2: Option<f64>,
}

impl SegmentRowDef {
    pub fn new(speed_low_kmh: f64, speed_high_kmh: f64, acc_cm_s2: f64) -> Self {
        Self {
            speed_low_kmh: Some(speed_low_kmh),
            speed_high_kmh: Some(speed_high_kmh),
            acc_cm_s2: Some(acc_cm_s2),
        }
    }
}

impl From<&SegmentRowDef> for RawSegmentRow {
    fn from(row: &SegmentRowDef) -> Self {
        RawSegmentRow {
            speed_low_kmh: row.speed_low_kmh,
            speed_high_kmh: row.speed_high_kmh,
            acc_cm_s2: row.acc_cm_s2,
        }
    }
}
