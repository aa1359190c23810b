//! Gyroscope bias calibration

use embedded_hal::delay::DelayNs;
use nalgebra::Vector3;

use crate::types::{AngularRate, CalibrationSettings};

/// Gyroscope bias state of a processor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Calibration {
    /// No calibration has run; the offset is zero
    #[default]
    Uncalibrated,
    /// Offset produced by the most recent calibration
    Calibrated(AngularRate),
}

impl Calibration {
    /// Offset to subtract from raw gyroscope readings
    pub fn offset(&self) -> AngularRate {
        match self {
            Calibration::Uncalibrated => AngularRate::zeros(),
            Calibration::Calibrated(offset) => *offset,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self, Calibration::Calibrated(_))
    }
}

/// Average gyroscope readings taken at rest
///
/// Calls `sample_source` `settings.samples` times, pausing
/// `settings.sample_delay_us` after each read. The device must be held still
/// for the whole run; motion is not detected and ends up in the average.
///
/// Returns `None` when `settings.samples` is zero.
///
/// # Example
/// ```
/// use embedded_hal::delay::DelayNs;
/// use orient_fusion::{AngularRate, CalibrationSettings};
/// use orient_fusion::calibration::average_angular_rate;
///
/// struct NoDelay;
///
/// impl DelayNs for NoDelay {
///     fn delay_ns(&mut self, _ns: u32) {}
/// }
///
/// let bias = average_angular_rate(
///     || AngularRate::new(0.01, -0.02, 0.005),
///     &mut NoDelay,
///     CalibrationSettings::default(),
/// );
/// assert!(bias.is_some());
/// ```
pub fn average_angular_rate<F, D>(
    mut sample_source: F,
    delay: &mut D,
    settings: CalibrationSettings,
) -> Option<AngularRate>
where
    F: FnMut() -> AngularRate,
    D: DelayNs + ?Sized,
{
    if settings.samples == 0 {
        return None;
    }

    // Running mean, so a constant source reproduces its value exactly
    let mut mean = Vector3::zeros();
    for count in 1..=settings.samples {
        let sample = sample_source().into_inner();
        mean += (sample - mean) / count as f32;
        delay.delay_us(settings.sample_delay_us);
    }

    Some(AngularRate::from(mean))
}

/// Subtract a gyroscope bias from a raw reading
pub fn remove_bias(reading: AngularRate, offset: AngularRate) -> AngularRate {
    reading - offset
}
