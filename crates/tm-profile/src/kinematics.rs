//! Constant-acceleration kinematics on uom quantities.

use tm_core::units::{Accel, Length, Time, Velocity};

/// Time and distance needed to change speed from `v0` to `v1` at constant `a`.
///
/// `Δt = (v1 − v0) / a`, `Δs = v0·Δt + ½·a·Δt²`.
pub fn constant_accel_step(v0: Velocity, v1: Velocity, a: Accel) -> (Time, Length) {
    let dt: Time = (v1 - v0) / a;
    let cruise: Length = v0 * dt;
    let ramp: Length = a * dt * dt * 0.5;
    (dt, cruise + ramp)
}

/// Distance covered at constant speed `v` over `dt`.
pub fn constant_speed_run(v: Velocity, dt: Time) -> Length {
    v * dt
}
