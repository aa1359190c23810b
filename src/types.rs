//! Sensor value types and settings for the orientation filter

use core::ops::Sub;

use nalgebra::Vector3;

use crate::math::RAD_TO_DEG;

/// Accelerometer reading in physical acceleration units (e.g. m/s² or g)
///
/// Only the direction of the vector matters to the filter, so any consistent
/// unit works. Kept distinct from [`AngularRate`] so the two readings cannot
/// be swapped by accident.
///
/// # Example
/// ```
/// use orient_fusion::Acceleration;
///
/// let level = Acceleration::new(0.0, 0.0, 9.81);
/// assert_eq!(level.z(), 9.81);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration(Vector3<f32>);

impl Acceleration {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn into_inner(self) -> Vector3<f32> {
        self.0
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<Vector3<f32>> for Acceleration {
    fn from(vector: Vector3<f32>) -> Self {
        Self(vector)
    }
}

/// Gyroscope reading in radians per second
///
/// # Example
/// ```
/// use orient_fusion::AngularRate;
///
/// let raw = AngularRate::new(0.12, -0.03, 0.01);
/// let bias = AngularRate::new(0.02, -0.03, 0.01);
/// let corrected = raw - bias;
/// assert!((corrected.x() - 0.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularRate(Vector3<f32>);

impl AngularRate {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn into_inner(self) -> Vector3<f32> {
        self.0
    }
}

impl Default for AngularRate {
    fn default() -> Self {
        Self::zeros()
    }
}

impl From<Vector3<f32>> for AngularRate {
    fn from(vector: Vector3<f32>) -> Self {
        Self(vector)
    }
}

impl Sub for AngularRate {
    type Output = AngularRate;

    fn sub(self, rhs: AngularRate) -> AngularRate {
        AngularRate(self.0 - rhs.0)
    }
}

/// Unit for reading back orientation angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Pitch and roll estimate
///
/// Pitch is the rotation about the Y axis, roll the rotation about the X axis.
/// Neither is wrapped, so continuous rotation can leave the ±π range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angles {
    pub pitch: f32,
    pub roll: f32,
}

impl Angles {
    pub fn new(pitch: f32, roll: f32) -> Self {
        Self { pitch, roll }
    }

    /// Convert a radian pair to degrees
    pub fn to_degrees(self) -> Self {
        Self {
            pitch: self.pitch * RAD_TO_DEG,
            roll: self.roll * RAD_TO_DEG,
        }
    }

    pub(crate) fn in_unit(self, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Radians => self,
            AngleUnit::Degrees => self.to_degrees(),
        }
    }
}

/// Identifies which blend weight a rejected value was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeightAxis {
    /// The uniform weight applied to both axes
    Both,
    Pitch,
    Roll,
}

/// Complementary filter settings
///
/// # Example
/// ```
/// use orient_fusion::FilterSettings;
///
/// let settings = FilterSettings {
///     update_rate: 200.0,
///     gyro_weight: 0.98,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterSettings {
    /// Target update rate in Hz
    ///
    /// Determines the nominal period substituted for degenerate time deltas
    /// and the minimum spacing the processor enforces between updates.
    pub update_rate: f32,
    /// Initial blend weight for both axes, in [0, 1]
    ///
    /// 1 integrates the gyroscope only, 0 follows the accelerometer only.
    pub gyro_weight: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            update_rate: 100.0,
            gyro_weight: 0.95,
        }
    }
}

/// Gyroscope bias calibration settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationSettings {
    /// Number of samples averaged into the offset
    pub samples: u32,
    /// Pause between consecutive samples in microseconds
    pub sample_delay_us: u32,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            samples: 100,
            sample_delay_us: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angular_rate_subtraction() {
        let raw = AngularRate::new(1.0, 2.0, 3.0);
        let bias = AngularRate::new(0.5, -1.0, 3.0);

        assert_eq!(raw - bias, AngularRate::new(0.5, 3.0, 0.0));
    }

    #[test]
    fn test_angles_unit_conversion() {
        let angles = Angles::new(core::f32::consts::FRAC_PI_2, -core::f32::consts::PI);

        let degrees = angles.in_unit(AngleUnit::Degrees);
        assert!((degrees.pitch - 90.0).abs() < 1e-4);
        assert!((degrees.roll + 180.0).abs() < 1e-4);

        assert_eq!(angles.in_unit(AngleUnit::Radians), angles);
    }

    #[test]
    fn test_default_settings() {
        let filter = FilterSettings::default();
        assert_eq!(filter.update_rate, 100.0);
        assert_eq!(filter.gyro_weight, 0.95);

        let calibration = CalibrationSettings::default();
        assert_eq!(calibration.samples, 100);
        assert_eq!(calibration.sample_delay_us, 5_000);
    }
}
