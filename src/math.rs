//! Angle math for the orientation filter

use crate::types::{Acceleration, Angles};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Smallest denominator magnitude handed to `atan2`
pub const DENOMINATOR_EPSILON: f32 = 1e-10;

/// Replace a near-zero value with a signed epsilon
fn clamp_away_from_zero(value: f32) -> f32 {
    if value.abs() < DENOMINATOR_EPSILON {
        if value >= 0.0 {
            DENOMINATOR_EPSILON
        } else {
            -DENOMINATOR_EPSILON
        }
    } else {
        value
    }
}

/// Pitch implied by the gravity direction, in radians
///
/// `atan2(-ax, sqrt(ay² + az²))`
pub fn accelerometer_pitch(accelerometer: &Acceleration) -> f32 {
    let (y, z) = (accelerometer.y(), accelerometer.z());
    let denominator = clamp_away_from_zero(libm::sqrtf(y * y + z * z));
    libm::atan2f(-accelerometer.x(), denominator)
}

/// Roll implied by the gravity direction, in radians
///
/// `atan2(ay, sqrt(ax² + az²))`
pub fn accelerometer_roll(accelerometer: &Acceleration) -> f32 {
    let (x, z) = (accelerometer.x(), accelerometer.z());
    let denominator = clamp_away_from_zero(libm::sqrtf(x * x + z * z));
    libm::atan2f(accelerometer.y(), denominator)
}

/// Instantaneous, unfiltered pitch and roll from a single accelerometer reading
pub fn accelerometer_angles(accelerometer: &Acceleration) -> Angles {
    Angles::new(
        accelerometer_pitch(accelerometer),
        accelerometer_roll(accelerometer),
    )
}
