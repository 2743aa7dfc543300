//! Phase results and the assembled motion profile.

use std::fmt;

use serde::{Deserialize, Serialize};
use tm_core::round3;

/// The five motion phases, in the order they are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Acceleration,
    TractionSwitch,
    ConstantSpeed,
    BrakeBuild,
    Deceleration,
}

impl PhaseKind {
    pub const ORDER: [PhaseKind; 5] = [
        PhaseKind::Acceleration,
        PhaseKind::TractionSwitch,
        PhaseKind::ConstantSpeed,
        PhaseKind::BrakeBuild,
        PhaseKind::Deceleration,
    ];

    /// Stable machine identifier.
    pub fn id(self) -> &'static str {
        match self {
            PhaseKind::Acceleration => "acceleration",
            PhaseKind::TractionSwitch => "traction_switch",
            PhaseKind::ConstantSpeed => "constant_speed",
            PhaseKind::BrakeBuild => "brake_build",
            PhaseKind::Deceleration => "deceleration",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Acceleration => "Acceleration",
            PhaseKind::TractionSwitch => "Traction switch",
            PhaseKind::ConstantSpeed => "Constant speed",
            PhaseKind::BrakeBuild => "Brake build",
            PhaseKind::Deceleration => "Deceleration",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `(speed, distance)` sample on the speed-distance curve.
///
/// Distance is cumulative from the start of the profile and unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub speed_kmh: f64,
    pub distance_m: f64,
}

impl BoundaryPoint {
    pub fn new(speed_kmh: f64, distance_m: f64) -> Self {
        Self {
            speed_kmh,
            distance_m,
        }
    }
}

/// Outcome of one phase. `points` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseResult {
    kind: PhaseKind,
    duration_s: f64,
    distance_m: f64,
    points: Vec<BoundaryPoint>,
}

impl PhaseResult {
    /// Phase drawn between two points. Duration and distance are rounded.
    pub(crate) fn span(
        kind: PhaseKind,
        duration_s: f64,
        distance_m: f64,
        start: BoundaryPoint,
        end: BoundaryPoint,
    ) -> Self {
        Self::trace(kind, duration_s, distance_m, vec![start, end])
    }

    /// Phase drawn through `points`, which must hold at least the start point.
    pub(crate) fn trace(
        kind: PhaseKind,
        duration_s: f64,
        distance_m: f64,
        points: Vec<BoundaryPoint>,
    ) -> Self {
        debug_assert!(!points.is_empty());
        Self {
            kind,
            duration_s: round3(duration_s),
            distance_m: round3(distance_m),
            points,
        }
    }

    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    /// Phase duration in seconds, rounded to 3 places.
    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Distance covered in this phase in metres, rounded to 3 places.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    pub fn start(&self) -> BoundaryPoint {
        self.points[0]
    }

    /// State handed to the next phase.
    pub fn end(&self) -> BoundaryPoint {
        self.points[self.points.len() - 1]
    }
}

/// All five phases plus totals and the flattened curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionProfile {
    phases: Vec<PhaseResult>,
    total_time_s: f64,
    total_distance_m: f64,
    points: Vec<BoundaryPoint>,
}

impl MotionProfile {
    /// Totals are sums of the already-rounded phase values, rounded again.
    pub(crate) fn from_phases(phases: Vec<PhaseResult>) -> Self {
        let total_time_s = round3(phases.iter().map(|p| p.duration_s).sum());
        let total_distance_m = round3(phases.iter().map(|p| p.distance_m).sum());
        let points = phases
            .iter()
            .flat_map(|p| p.points.iter().copied())
            .collect();
        Self {
            phases,
            total_time_s,
            total_distance_m,
            points,
        }
    }

    pub fn phases(&self) -> &[PhaseResult] {
        &self.phases
    }

    pub fn phase(&self, kind: PhaseKind) -> Option<&PhaseResult> {
        self.phases.iter().find(|p| p.kind == kind)
    }

    pub fn total_time_s(&self) -> f64 {
        self.total_time_s
    }

    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Every phase's boundary points concatenated, for plotting.
    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }
}
