//! Run the phase engine for a loaded profile.

use serde::Serialize;
use tm_profile::{
    BoundaryPoint, EngineOptions, MotionProfile, ParameterSet, PhaseEngine, PhaseResult,
};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::profile_service::ProfileInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    AllPhases,
    AccelerationOnly,
}

#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub mode: RunMode,
    /// `key=value` parameter overrides, applied in order.
    pub overrides: Vec<String>,
    /// Replaces the document's engine options when set.
    pub options: Option<EngineOptions>,
}

/// What a front end shows after a run.
///
/// In acceleration-only mode the totals are the acceleration phase's own
/// time and distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub name: String,
    pub mode: RunMode,
    pub parameters: ParameterSet,
    pub phases: Vec<PhaseResult>,
    pub total_time_s: f64,
    pub total_distance_m: f64,
    pub points: Vec<BoundaryPoint>,
}

impl RunOutcome {
    fn from_profile(name: &str, parameters: ParameterSet, profile: MotionProfile) -> Self {
        Self {
            name: name.to_string(),
            mode: RunMode::AllPhases,
            parameters,
            phases: profile.phases().to_vec(),
            total_time_s: profile.total_time_s(),
            total_distance_m: profile.total_distance_m(),
            points: profile.points().to_vec(),
        }
    }

    fn from_acceleration(name: &str, parameters: ParameterSet, phase: PhaseResult) -> Self {
        Self {
            name: name.to_string(),
            mode: RunMode::AccelerationOnly,
            parameters,
            total_time_s: phase.duration_s(),
            total_distance_m: phase.distance_m(),
            points: phase.points().to_vec(),
            phases: vec![phase],
        }
    }
}

/// Apply `key=value` overrides, returning a new parameter set.
pub fn apply_overrides(params: &ParameterSet, overrides: &[String]) -> AppResult<ParameterSet> {
    let mut current = *params;
    for entry in overrides {
        let (key, raw) = entry.split_once('=').ok_or_else(|| {
            AppError::InvalidInput(format!("Override '{}' is not key=value", entry))
        })?;
        let value: f64 = raw.trim().parse().map_err(|_| {
            AppError::InvalidInput(format!("Override '{}' has a non-numeric value", entry))
        })?;
        current = current.with_override(key.trim(), value)?;
    }
    Ok(current)
}

/// All five phases with the document's own parameters and options.
pub fn run_all(inputs: &ProfileInputs) -> AppResult<MotionProfile> {
    Ok(inputs.engine().calculate_all_phases()?)
}

/// Acceleration phase only.
pub fn run_acceleration(inputs: &ProfileInputs) -> AppResult<PhaseResult> {
    Ok(inputs.engine().calculate_acceleration()?)
}

/// Run with overrides and option changes from `request`.
pub fn run(inputs: &ProfileInputs, request: &RunRequest) -> AppResult<RunOutcome> {
    let params = apply_overrides(&inputs.params, &request.overrides)?;
    let options = request.options.unwrap_or(inputs.options);
    let engine = PhaseEngine::with_options(&inputs.segments, &params, options);

    let outcome = match request.mode {
        RunMode::AllPhases => {
            RunOutcome::from_profile(&inputs.name, params, engine.calculate_all_phases()?)
        }
        RunMode::AccelerationOnly => {
            RunOutcome::from_acceleration(&inputs.name, params, engine.calculate_acceleration()?)
        }
    };
    info!(
        profile = %inputs.name,
        mode = ?request.mode,
        total_time_s = outcome.total_time_s,
        total_distance_m = outcome.total_distance_m,
        "run complete"
    );
    Ok(outcome)
}
