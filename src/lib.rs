#![cfg_attr(not(feature = "std"), no_std)]

//! Orient Fusion - pitch and roll estimation for embedded controllers
//!
//! A complementary filter that blends the absolute but noisy angle implied by
//! the accelerometer with the smooth but drifting integral of the gyroscope.
//! It is a low-compute alternative to a Kalman filter for tilt sensing.
//!
//! Two layers are provided:
//!
//! - [`ComplementaryFilter`]: the numeric core, turning (acceleration, angular
//!   rate, time step) samples into a pitch/roll estimate
//! - [`OrientationProcessor`]: gyroscope bias calibration and update-rate
//!   gating in front of the filter
//!
//! Yaw is not estimated; there is no magnetometer input.
//!
//! # Features
//!
//! - `#![no_std]` by default; time comes from a host [`Clock`] and pauses from
//!   an [`embedded_hal::delay::DelayNs`] implementation
//! - `std`: adds `StdClock` and `StdDelay` backed by the standard library
//! - `defmt`: logs calibration and rejected settings through `defmt`
//!
//! # Quick Start
//!
//! ```rust
//! use core::cell::Cell;
//! use embedded_hal::delay::DelayNs;
//! use orient_fusion::{
//!     Acceleration, AngleUnit, AngularRate, CalibrationSettings, Clock, OrientationProcessor,
//! };
//!
//! struct Ticks(Cell<u64>);
//!
//! impl Clock for Ticks {
//!     fn now_us(&self) -> u64 {
//!         self.0.get()
//!     }
//! }
//!
//! struct Delay<'a>(&'a Ticks);
//!
//! impl DelayNs for Delay<'_> {
//!     fn delay_ns(&mut self, ns: u32) {
//!         self.0.0.set(self.0.0.get() + u64::from(ns) / 1_000);
//!     }
//! }
//!
//! let clock = Ticks(Cell::new(0));
//! let mut processor = OrientationProcessor::new(&clock);
//!
//! // Hold still: the gyroscope reads only its bias
//! processor.calibrate_gyro(
//!     || AngularRate::new(0.002, -0.001, 0.0),
//!     &mut Delay(&clock),
//!     CalibrationSettings::default(),
//! );
//!
//! // One tick of the control loop, 10 ms later
//! clock.0.set(clock.0.get() + 10_000);
//! let accelerometer = Acceleration::new(0.0, 0.0, 9.81); // m/s²
//! let gyroscope = AngularRate::new(0.002, -0.001, 0.0);  // rad/s
//!
//! if let Some(angles) = processor.update(accelerometer, gyroscope) {
//!     assert!(angles.pitch.abs() < 1e-6);
//! }
//!
//! let degrees = processor.orientation(AngleUnit::Degrees);
//! assert!(degrees.roll.abs() < 1e-4);
//! ```

pub mod calibration;
pub mod clock;
mod error;
mod filter;
pub mod math;
mod processor;
mod types;

// Re-export all public types and functions
pub use calibration::Calibration;
pub use clock::Clock;
#[cfg(feature = "std")]
pub use clock::{StdClock, StdDelay};
pub use error::Error;
pub use filter::ComplementaryFilter;
pub use math::{DEG_TO_RAD, RAD_TO_DEG};
pub use processor::OrientationProcessor;
pub use types::*;
