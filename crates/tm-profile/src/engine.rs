//! Five-phase motion calculation.
//!
//! The engine borrows its inputs and keeps no state between calls, so a
//! single instance can be shared across threads.

use tm_core::units::{Length, Time, cmps2, kmh, m, s, to_kmh};
use tm_core::{Tolerances, nearly_equal};
use tracing::{debug, warn};

use crate::error::{MotionError, MotionResult};
use crate::kinematics::{constant_accel_step, constant_speed_run};
use crate::options::{ContinuityPolicy, CoveragePolicy, EngineOptions};
use crate::params::ParameterSet;
use crate::phase::{BoundaryPoint, MotionProfile, PhaseKind, PhaseResult};
use crate::segment::SegmentTable;

/// Speeds closer than this (km/h) count as continuous between phases.
pub const CONTINUITY_TOLERANCE_KMH: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct PhaseEngine<'a> {
    segments: &'a SegmentTable,
    params: &'a ParameterSet,
    options: EngineOptions,
}

impl<'a> PhaseEngine<'a> {
    pub fn new(segments: &'a SegmentTable, params: &'a ParameterSet) -> Self {
        Self::with_options(segments, params, EngineOptions::default())
    }

    pub fn with_options(
        segments: &'a SegmentTable,
        params: &'a ParameterSet,
        options: EngineOptions,
    ) -> Self {
        Self {
            segments,
            params,
            options,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Accelerate from `init_speed_kmh` to `target_speed_kmh` through the
    /// segment table.
    ///
    /// Emits the start point plus one point per segment boundary crossed and
    /// the final point.
    pub fn calculate_acceleration(&self) -> MotionResult<PhaseResult> {
        let init_kmh = self.params.init_speed_kmh;
        let target_kmh = self.params.target_speed_kmh;
        let v_init = kmh(init_kmh);
        let v_target = kmh(target_kmh);
        if v_target <= v_init {
            return Err(MotionError::InvalidRange {
                what: format!(
                    "acceleration target {target_kmh} km/h must exceed initial speed {init_kmh} km/h"
                ),
            });
        }

        let mut elapsed: Time = s(0.0);
        let mut travelled: Length = m(0.0);
        let mut v = v_init;
        let mut points = vec![BoundaryPoint::new(to_kmh(v), 0.0)];
        let mut reached = false;

        // Full scan: overlapping tables do not keep upper bounds sorted.
        for segment in self.segments.iter() {
            let high = segment.high();
            if v >= high {
                continue;
            }
            if segment.low() > v {
                warn!(
                    gap_from_kmh = to_kmh(v),
                    gap_to_kmh = segment.speed_low_kmh,
                    "segment table gap, using next segment's acceleration"
                );
            }

            let a = segment.traction_accel()?;
            let ends_here = v_target <= high;
            let v_end = if ends_here { v_target } else { high };
            let (dt, ds) = constant_accel_step(v, v_end, a);
            elapsed += dt;
            travelled += ds;
            v = v_end;
            points.push(BoundaryPoint::new(to_kmh(v), travelled.value));

            debug!(
                low_kmh = segment.speed_low_kmh,
                high_kmh = segment.speed_high_kmh,
                dt_s = dt.value,
                ds_m = ds.value,
                "acceleration segment"
            );

            if ends_here {
                reached = true;
                break;
            }
        }

        if !reached {
            let (_, covered_kmh) = self.segments.coverage();
            match self.options.coverage {
                CoveragePolicy::Strict => {
                    return Err(MotionError::Coverage {
                        target_kmh,
                        covered_kmh,
                    });
                }
                CoveragePolicy::Permissive => {
                    warn!(
                        target_kmh,
                        reached_kmh = to_kmh(v),
                        "acceleration target above segment coverage, phase truncated"
                    );
                }
            }
        }

        let phase = PhaseResult::trace(
            PhaseKind::Acceleration,
            elapsed.value,
            travelled.value,
            points,
        );
        log_phase(&phase);
        Ok(phase)
    }

    /// Hold speed and position for `traction_switch_delay_s`.
    pub fn calculate_traction_switch(&self, prev: BoundaryPoint) -> PhaseResult {
        self.hold(
            PhaseKind::TractionSwitch,
            self.params.traction_switch_delay_s,
            prev,
        )
    }

    /// Run at `constant_speed_kmh` for `constant_time_s`.
    ///
    /// The first point keeps the carried-over speed; the last uses the
    /// configured speed. A mismatch is handled per `ContinuityPolicy`.
    pub fn calculate_constant_speed(&self, prev: BoundaryPoint) -> MotionResult<PhaseResult> {
        let speed_kmh = self.params.constant_speed_kmh;
        let time_s = self.params.constant_time_s;
        if !(speed_kmh > 0.0) {
            return Err(MotionError::invalid_parameter(
                "constant_speed_kmh",
                speed_kmh,
                "must be greater than 0",
            ));
        }

        let continuity = Tolerances {
            abs: CONTINUITY_TOLERANCE_KMH,
            rel: 0.0,
        };
        if !nearly_equal(prev.speed_kmh, speed_kmh, continuity) {
            match self.options.continuity {
                ContinuityPolicy::Strict => {
                    return Err(MotionError::InvalidRange {
                        what: format!(
                            "constant speed {speed_kmh} km/h does not match carried speed {} km/h",
                            prev.speed_kmh
                        ),
                    });
                }
                ContinuityPolicy::Permissive => {
                    warn!(
                        carried_kmh = prev.speed_kmh,
                        constant_kmh = speed_kmh,
                        "constant-speed phase starts at a different speed"
                    );
                }
            }
        }

        let run = constant_speed_run(kmh(speed_kmh), s(time_s));
        let end = BoundaryPoint::new(speed_kmh, prev.distance_m + run.value);
        let phase = PhaseResult::span(PhaseKind::ConstantSpeed, time_s, run.value, prev, end);
        log_phase(&phase);
        Ok(phase)
    }

    /// Hold speed and position for `brake_build_time_s`.
    pub fn calculate_brake_build(&self, prev: BoundaryPoint) -> PhaseResult {
        self.hold(PhaseKind::BrakeBuild, self.params.brake_build_time_s, prev)
    }

    /// Brake from the carried speed down to `coast_speed_kmh` at
    /// `decel_acc_cms2`.
    pub fn calculate_deceleration(&self, prev: BoundaryPoint) -> MotionResult<PhaseResult> {
        let decel = self.params.decel_acc_cms2;
        let coast_kmh = self.params.coast_speed_kmh;
        if !(decel < 0.0) {
            return Err(MotionError::invalid_parameter(
                "decel_acc_cms2",
                decel,
                "must be negative",
            ));
        }
        let v_init = kmh(prev.speed_kmh);
        let v_target = kmh(coast_kmh);
        if v_target >= v_init {
            return Err(MotionError::InvalidRange {
                what: format!(
                    "coast speed {coast_kmh} km/h must be below carried speed {} km/h",
                    prev.speed_kmh
                ),
            });
        }

        let (dt, ds) = constant_accel_step(v_init, v_target, cmps2(decel));
        let end = BoundaryPoint::new(coast_kmh, prev.distance_m + ds.value);
        let phase = PhaseResult::span(PhaseKind::Deceleration, dt.value, ds.value, prev, end);
        log_phase(&phase);
        Ok(phase)
    }

    /// Run all five phases in order, each starting where the last one ended.
    ///
    /// The first failure aborts the run; no partial profile is returned.
    pub fn calculate_all_phases(&self) -> MotionResult<MotionProfile> {
        let acceleration = self.calculate_acceleration()?;
        let traction_switch = self.calculate_traction_switch(acceleration.end());
        let constant_speed = self.calculate_constant_speed(traction_switch.end())?;
        let brake_build = self.calculate_brake_build(constant_speed.end());
        let deceleration = self.calculate_deceleration(brake_build.end())?;

        let profile = MotionProfile::from_phases(vec![
            acceleration,
            traction_switch,
            constant_speed,
            brake_build,
            deceleration,
        ]);
        debug!(
            total_time_s = profile.total_time_s(),
            total_distance_m = profile.total_distance_m(),
            "profile complete"
        );
        Ok(profile)
    }

    fn hold(&self, kind: PhaseKind, delay_s: f64, prev: BoundaryPoint) -> PhaseResult {
        let phase = PhaseResult::span(kind, delay_s, 0.0, prev, prev);
        log_phase(&phase);
        phase
    }
}

fn log_phase(phase: &PhaseResult) {
    debug!(
        phase = phase.kind().id(),
        duration_s = phase.duration_s(),
        distance_m = phase.distance_m(),
        points = phase.points().len(),
        "phase calculated"
    );
}
