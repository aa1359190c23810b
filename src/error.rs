//! Error type for rejected configuration values

use core::fmt;

use crate::types::WeightAxis;

/// Configuration value rejected by the filter or processor
///
/// No state is modified when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A blend weight outside [0, 1] (or NaN)
    InvalidWeight { axis: WeightAxis, value: f32 },
    /// An update rate that is not a finite, positive frequency
    InvalidUpdateRate(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidWeight { axis, value } => {
                let name = match axis {
                    WeightAxis::Both => "gyro",
                    WeightAxis::Pitch => "pitch",
                    WeightAxis::Roll => "roll",
                };
                write!(f, "{name} weight {value} is outside [0, 1]")
            }
            Error::InvalidUpdateRate(rate) => {
                write!(f, "update rate {rate} Hz must be finite and positive")
            }
        }
    }
}

impl core::error::Error for Error {}
