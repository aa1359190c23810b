//! Monotonic time source and host-backed delay

/// Monotonic microsecond time source supplied by the host
///
/// Implementations must never jump backwards under normal operation. A
/// wrapping hardware counter is tolerated: the resulting non-positive delta
/// is replaced with the nominal period by the filter.
///
/// # Example
/// ```
/// use core::cell::Cell;
/// use orient_fusion::Clock;
///
/// struct TickCounter(Cell<u64>);
///
/// impl Clock for TickCounter {
///     fn now_us(&self) -> u64 {
///         self.0.get()
///     }
/// }
/// ```
pub trait Clock {
    /// Current timestamp in microseconds
    fn now_us(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Seconds from `earlier` to `now`, negative if the clock went backwards
pub fn elapsed_seconds(earlier: u64, now: u64) -> f32 {
    let micros = now.wrapping_sub(earlier) as i64;
    micros as f32 * 1e-6
}

#[cfg(feature = "std")]
pub use self::host::{StdClock, StdDelay};

#[cfg(feature = "std")]
mod host {
    extern crate std;

    use std::time::{Duration, Instant};

    use super::Clock;

    /// [`Clock`] backed by `std::time::Instant`
    #[derive(Debug, Clone, Copy)]
    pub struct StdClock {
        origin: Instant,
    }

    impl StdClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now_us(&self) -> u64 {
            self.origin.elapsed().as_micros() as u64
        }
    }

    /// Blocking delay backed by `std::thread::sleep`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdDelay;

    impl embedded_hal::delay::DelayNs for StdDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(Duration::from_nanos(u64::from(ns)));
        }
    }
}
