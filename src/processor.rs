//! Orientation processor: bias correction and update-rate gating in front of the filter

use embedded_hal::delay::DelayNs;

use crate::calibration::{Calibration, average_angular_rate, remove_bias};
use crate::clock::{Clock, elapsed_seconds};
use crate::error::Error;
use crate::filter::ComplementaryFilter;
use crate::types::{
    Acceleration, AngleUnit, Angles, AngularRate, CalibrationSettings, FilterSettings,
};

/// Gated, bias-corrected pitch and roll estimator
///
/// Wraps a [`ComplementaryFilter`] and adds two things:
/// - a gyroscope offset, measured by [`calibrate_gyro`](Self::calibrate_gyro)
///   and subtracted from every reading
/// - a minimum interval between accepted updates, derived from the update
///   rate; calls arriving sooner are skipped without touching any state
///
/// The filter is only ever driven through the processor, with the interval
/// the processor measured, so the two never integrate on different cadences.
///
/// # Example
/// ```
/// use core::cell::Cell;
/// use orient_fusion::{Acceleration, AngularRate, Clock, OrientationProcessor};
///
/// struct Ticks(Cell<u64>);
///
/// impl Clock for Ticks {
///     fn now_us(&self) -> u64 {
///         self.0.get()
///     }
/// }
///
/// let clock = Ticks(Cell::new(0));
/// let mut processor = OrientationProcessor::new(&clock);
///
/// let accel = Acceleration::new(0.0, 0.0, 9.81);
/// let gyro = AngularRate::zeros();
///
/// // Too soon after construction
/// assert!(processor.update(accel, gyro).is_none());
///
/// clock.0.set(10_000);
/// assert!(processor.update(accel, gyro).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct OrientationProcessor<C: Clock> {
    filter: ComplementaryFilter<C>,
    calibration: Calibration,
    /// Minimum spacing between accepted updates
    min_interval_us: u64,
    /// Timestamp of the last accepted update
    last_update_us: u64,
}

impl<C: Clock> OrientationProcessor<C> {
    /// Create a processor with default settings (100 Hz, weight 0.95)
    pub fn new(clock: C) -> Self {
        Self::from_filter(ComplementaryFilter::new(clock))
    }

    /// Create a processor with the given filter settings
    pub fn with_settings(settings: FilterSettings, clock: C) -> Result<Self, Error> {
        ComplementaryFilter::with_settings(settings, clock).map(Self::from_filter)
    }

    fn from_filter(filter: ComplementaryFilter<C>) -> Self {
        let min_interval_us = (1_000_000.0 / filter.update_rate()) as u64;
        let last_update_us = filter.clock().now_us();
        Self {
            filter,
            calibration: Calibration::Uncalibrated,
            min_interval_us,
            last_update_us,
        }
    }

    /// Measure the gyroscope zero offset
    ///
    /// Averages `settings.samples` readings from `sample_source`, pausing
    /// `settings.sample_delay_us` with `delay` after each one, and replaces
    /// the current offset with the result. Previous calibrations are
    /// discarded, not blended.
    ///
    /// Blocks for `samples * sample_delay_us`. The device must stay still
    /// throughout; a moving sensor is not detected and biases every later
    /// estimate. With zero samples the current offset is kept.
    ///
    /// Returns the offset now in effect.
    pub fn calibrate_gyro<F, D>(
        &mut self,
        sample_source: F,
        delay: &mut D,
        settings: CalibrationSettings,
    ) -> AngularRate
    where
        F: FnMut() -> AngularRate,
        D: DelayNs + ?Sized,
    {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "calibrating gyroscope, keep device still ({} samples)",
            settings.samples
        );

        match average_angular_rate(sample_source, delay, settings) {
            Some(offset) => {
                self.calibration = Calibration::Calibrated(offset);
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "gyroscope calibrated: offset ({}, {}, {}) rad/s",
                    offset.x(),
                    offset.y(),
                    offset.z()
                );
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("gyroscope calibration skipped: zero samples requested");
            }
        }

        self.gyro_offset()
    }

    /// Install a previously measured gyroscope offset
    pub fn set_gyro_offset(&mut self, offset: AngularRate) {
        self.calibration = Calibration::Calibrated(offset);
    }

    /// Whether the minimum interval has passed since the last accepted update
    pub fn should_update(&self) -> bool {
        self.interval_elapsed(self.filter.clock().now_us())
    }

    fn interval_elapsed(&self, now: u64) -> bool {
        let elapsed = now.wrapping_sub(self.last_update_us) as i64;
        elapsed >= self.min_interval_us as i64
    }

    /// Feed a new sample through bias correction into the filter
    ///
    /// Returns `None` without modifying anything when called before the
    /// minimum interval has elapsed. The baseline is not moved by skipped
    /// calls, so a fast caller is accepted as soon as enough time has passed
    /// since the last accepted update.
    pub fn update(
        &mut self,
        accelerometer: Acceleration,
        gyroscope: AngularRate,
    ) -> Option<Angles> {
        let now = self.filter.clock().now_us();
        if !self.interval_elapsed(now) {
            return None;
        }

        let dt = elapsed_seconds(self.last_update_us, now);
        self.last_update_us = now;

        let corrected = remove_bias(gyroscope, self.calibration.offset());
        Some(self.filter.update(accelerometer, corrected, Some(dt)))
    }

    /// Current estimate in the requested unit
    pub fn orientation(&self, unit: AngleUnit) -> Angles {
        self.filter.angles(unit)
    }

    /// Set the filter blend weights; see [`ComplementaryFilter::set_weights`]
    pub fn set_filter_weights(
        &mut self,
        gyro_weight: Option<f32>,
        pitch_weight: Option<f32>,
        roll_weight: Option<f32>,
    ) -> Result<(), Error> {
        self.filter.set_weights(gyro_weight, pitch_weight, roll_weight)
    }

    /// Zero the estimate and restart the update gate from now
    ///
    /// The gyroscope offset is kept.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.last_update_us = self.filter.clock().now_us();
    }

    pub fn gyro_offset(&self) -> AngularRate {
        self.calibration.offset()
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    pub fn min_interval_us(&self) -> u64 {
        self.min_interval_us
    }

    pub fn last_update_us(&self) -> u64 {
        self.last_update_us
    }

    pub fn filter(&self) -> &ComplementaryFilter<C> {
        &self.filter
    }
}
