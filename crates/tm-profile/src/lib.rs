//! Train motion profile engine.
//!
//! Provides:
//! - Speed-banded acceleration segments (`SegmentTable`)
//! - The eight named run parameters (`ParameterSet`)
//! - A stateless five-phase engine (`PhaseEngine`) producing a `MotionProfile`
//!
//! Phases always run in the same order: acceleration, traction switch,
//! constant speed, brake build, deceleration. Each phase starts from the
//! last boundary point of the one before it.

pub mod engine;
pub mod error;
pub mod kinematics;
pub mod options;
pub mod params;
pub mod phase;
pub mod segment;

pub use engine::PhaseEngine;
pub use error::{MotionError, MotionResult};
pub use options::{ContinuityPolicy, CoveragePolicy, EngineOptions};
pub use params::{LEGACY_PARAMETER_ALIASES, ParameterSet, REQUIRED_PARAMETERS};
pub use phase::{BoundaryPoint, MotionProfile, PhaseKind, PhaseResult};
pub use segment::{RawSegmentRow, Segment, SegmentTable};
