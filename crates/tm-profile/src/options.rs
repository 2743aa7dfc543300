//! Engine policies for behaviour the input data does not pin down.

use serde::{Deserialize, Serialize};

/// What to do when the acceleration target lies above the highest segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Fail with `MotionError::Coverage`.
    #[default]
    Strict,
    /// Stop at the last segment and report the partial phase.
    Permissive,
}

/// What to do when the carried-over speed differs from the configured
/// constant speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityPolicy {
    /// Log a warning and jump to the configured speed.
    #[default]
    Permissive,
    /// Fail with `MotionError::InvalidRange`.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub coverage: CoveragePolicy,
    #[serde(default)]
    pub continuity: ContinuityPolicy,
}
