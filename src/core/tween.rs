//! Critically-damped smoothing toward a moving target.
//!
//! Used for agent facing: the agent turns toward its target with a bounded
//! angular velocity instead of snapping.

use std::f32::consts::{PI, TAU};

/// Smallest smoothing time accepted; avoids dividing by zero.
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Move `current` toward `target` with critically-damped spring behaviour.
///
/// `velocity` carries state between calls and must be kept by the caller.
/// `smooth_time` is roughly the time it takes to reach the target. The
/// result never overshoots the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;

    // Polynomial approximation of exp(-omega * dt)
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let mut output = target + (change + temp) * decay;

    // Clamp overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// Signed shortest difference `to - from`, wrapped into (-PI, PI].
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// `smooth_damp` for angles in radians, always turning the short way round.
pub fn smooth_damp_angle(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let unwrapped_target = current + delta_angle(current, target);
    smooth_damp(current, unwrapped_target, velocity, smooth_time, dt)
}
