//! Platform abstractions for time and temperature acquisition.
//!
//! The control core never talks to hardware directly. The platform provides
//! a millisecond [`Clock`] and a [`TemperatureSensor`] driver; indicator
//! outputs use `embedded_hal::digital::OutputPin`.

/// Milliseconds since boot.
///
/// Wraps around after ~49.7 days, like the platform tick counter it mirrors.
/// Always compare instants with [`Instant::elapsed_since`], never with `<`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(pub u32);

impl Instant {
    /// Instant from a raw millisecond count.
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Raw millisecond count.
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, wrap-safe.
    pub const fn elapsed_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Instant;
}

/// Temperature sensor driver.
///
/// A read may block for the duration of the sensor protocol (a few
/// milliseconds on single-wire sensors). Drivers that report failures as NaN
/// instead of an error are accepted; the sensor proxy treats both as invalid.
pub trait TemperatureSensor {
    /// Driver-specific error type
    type Error;

    /// Perform one acquisition, in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}
