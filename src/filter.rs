//! Complementary filter blending accelerometer and gyroscope angles

use crate::clock::{Clock, elapsed_seconds};
use crate::error::Error;
use crate::math::accelerometer_angles;
use crate::types::{Acceleration, AngleUnit, Angles, AngularRate, FilterSettings, WeightAxis};

/// Pitch and roll complementary filter
///
/// Each update integrates the gyroscope rate onto the previous estimate and
/// pulls the result towards the angle implied by the accelerometer:
///
/// ```text
/// pitch = w_p * (pitch + gyro.y * dt) + (1 - w_p) * accel_pitch
/// roll  = w_r * (roll  + gyro.x * dt) + (1 - w_r) * accel_roll
/// ```
///
/// A weight of 1 integrates the gyroscope only (smooth, drifts), a weight of
/// 0 follows the accelerometer only (noisy, bias free).
///
/// # Example
/// ```
/// use core::cell::Cell;
/// use orient_fusion::{Acceleration, AngleUnit, AngularRate, Clock, ComplementaryFilter};
///
/// struct Ticks(Cell<u64>);
///
/// impl Clock for Ticks {
///     fn now_us(&self) -> u64 {
///         self.0.get()
///     }
/// }
///
/// let mut filter = ComplementaryFilter::new(Ticks(Cell::new(0)));
/// filter.update(
///     Acceleration::new(0.0, 0.0, 9.81),
///     AngularRate::new(0.0, 0.1, 0.0),
///     Some(0.01),
/// );
/// let degrees = filter.angles(AngleUnit::Degrees);
/// assert!(degrees.pitch > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ComplementaryFilter<C: Clock> {
    clock: C,
    /// Configured rate in Hz
    update_rate: f32,
    /// Period substituted for degenerate time deltas, in seconds
    nominal_dt: f32,
    pitch_weight: f32,
    roll_weight: f32,
    /// Current estimate in radians
    pitch: f32,
    roll: f32,
    /// Timestamp of the last update or reset
    last_update_us: u64,
}

impl<C: Clock> ComplementaryFilter<C> {
    /// Create a filter with default settings (100 Hz, weight 0.95)
    pub fn new(clock: C) -> Self {
        let settings = FilterSettings::default();
        Self::build(settings, clock)
    }

    /// Create a filter with the given settings
    ///
    /// Fails if the update rate is not finite and positive or the weight is
    /// outside [0, 1].
    pub fn with_settings(settings: FilterSettings, clock: C) -> Result<Self, Error> {
        if !(settings.update_rate.is_finite() && settings.update_rate > 0.0) {
            return Err(Error::InvalidUpdateRate(settings.update_rate));
        }
        check_weight(WeightAxis::Both, settings.gyro_weight)?;

        Ok(Self::build(settings, clock))
    }

    fn build(settings: FilterSettings, clock: C) -> Self {
        let last_update_us = clock.now_us();
        Self {
            clock,
            update_rate: settings.update_rate,
            nominal_dt: 1.0 / settings.update_rate,
            pitch_weight: settings.gyro_weight,
            roll_weight: settings.gyro_weight,
            pitch: 0.0,
            roll: 0.0,
            last_update_us,
        }
    }

    /// Set the gyroscope blend weights
    ///
    /// `gyro_weight` applies to both axes first, then `pitch_weight` and
    /// `roll_weight` override their own axis. Every supplied value must lie in
    /// [0, 1]; if any does not, no weight is changed.
    ///
    /// # Example
    /// ```
    /// # use core::cell::Cell;
    /// # use orient_fusion::{Clock, ComplementaryFilter};
    /// # struct Ticks(Cell<u64>);
    /// # impl Clock for Ticks { fn now_us(&self) -> u64 { self.0.get() } }
    /// let mut filter = ComplementaryFilter::new(Ticks(Cell::new(0)));
    ///
    /// filter.set_weights(Some(0.9), Some(0.98), None).unwrap();
    /// assert_eq!(filter.pitch_weight(), 0.98);
    /// assert_eq!(filter.roll_weight(), 0.9);
    ///
    /// assert!(filter.set_weights(Some(1.2), None, None).is_err());
    /// assert_eq!(filter.roll_weight(), 0.9);
    /// ```
    pub fn set_weights(
        &mut self,
        gyro_weight: Option<f32>,
        pitch_weight: Option<f32>,
        roll_weight: Option<f32>,
    ) -> Result<(), Error> {
        let checks = [
            (WeightAxis::Both, gyro_weight),
            (WeightAxis::Pitch, pitch_weight),
            (WeightAxis::Roll, roll_weight),
        ];
        for (axis, weight) in checks {
            if let Some(value) = weight {
                check_weight(axis, value)?;
            }
        }

        if let Some(weight) = gyro_weight {
            self.pitch_weight = weight;
            self.roll_weight = weight;
        }
        if let Some(weight) = pitch_weight {
            self.pitch_weight = weight;
        }
        if let Some(weight) = roll_weight {
            self.roll_weight = weight;
        }

        Ok(())
    }

    /// Update the estimate with a new accelerometer and gyroscope sample
    ///
    /// # Arguments
    /// * `accelerometer` - Acceleration in any consistent unit
    /// * `gyroscope` - Angular rate in radians per second
    /// * `dt` - Time step in seconds; measured from the clock when `None`
    ///
    /// A time step that is not positive (including a measured delta from a
    /// clock that wrapped) is replaced by the nominal period, so the estimate
    /// never freezes or runs backwards.
    pub fn update(
        &mut self,
        accelerometer: Acceleration,
        gyroscope: AngularRate,
        dt: Option<f32>,
    ) -> Angles {
        let now = self.clock.now_us();
        let dt = dt.unwrap_or_else(|| elapsed_seconds(self.last_update_us, now));
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("degenerate time step {}, using {}", dt, self.nominal_dt);
            self.nominal_dt
        };
        self.last_update_us = now;

        let measured = accelerometer_angles(&accelerometer);

        self.pitch = self.pitch_weight * (self.pitch + gyroscope.y() * dt)
            + (1.0 - self.pitch_weight) * measured.pitch;
        self.roll = self.roll_weight * (self.roll + gyroscope.x() * dt)
            + (1.0 - self.roll_weight) * measured.roll;

        Angles::new(self.pitch, self.roll)
    }

    /// Current estimate in the requested unit
    pub fn angles(&self, unit: AngleUnit) -> Angles {
        Angles::new(self.pitch, self.roll).in_unit(unit)
    }

    /// Unfiltered angles implied by a single accelerometer reading, in radians
    pub fn accelerometer_angles(&self, accelerometer: &Acceleration) -> Angles {
        accelerometer_angles(accelerometer)
    }

    /// Zero both angles and restart timing from now; weights are kept
    pub fn reset(&mut self) {
        self.pitch = 0.0;
        self.roll = 0.0;
        self.last_update_us = self.clock.now_us();
    }

    pub fn pitch_weight(&self) -> f32 {
        self.pitch_weight
    }

    pub fn roll_weight(&self) -> f32 {
        self.roll_weight
    }

    pub fn update_rate(&self) -> f32 {
        self.update_rate
    }

    /// Period in seconds used when no usable time step is available
    pub fn nominal_dt(&self) -> f32 {
        self.nominal_dt
    }

    pub fn last_update_us(&self) -> u64 {
        self.last_update_us
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn check_weight(axis: WeightAxis, value: f32) -> Result<(), Error> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!("rejected {} weight {}", axis, value);
        Err(Error::InvalidWeight { axis, value })
    }
}
