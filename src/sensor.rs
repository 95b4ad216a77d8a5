//! Sensor proxy.
//!
//! Turns each query into one timestamped [`Reading`] and starts the activity
//! flash window as a side effect, whoever the caller is.

use crate::error::ControlError;
use crate::indicator::FlashWindow;
use crate::io::{Clock, Instant, TemperatureSensor};

/// Result of one sensor acquisition.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperature in °C, `None` when the acquisition failed
    pub value: Option<f32>,

    /// Time the acquisition was requested
    pub acquired_at: Instant,
}

impl Reading {
    /// True when the acquisition produced a value.
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    /// Value, or `SensorFault` for a failed acquisition.
    pub fn celsius(&self) -> Result<f32, ControlError> {
        self.value.ok_or(ControlError::SensorFault)
    }
}

/// Proxy in front of a [`TemperatureSensor`] driver.
#[derive(Debug)]
pub struct SensorProxy<S: TemperatureSensor> {
    sensor: S,
    activity: FlashWindow,
}

impl<S: TemperatureSensor> SensorProxy<S> {
    /// Wrap a driver.
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            activity: FlashWindow::new(),
        }
    }

    /// Perform one acquisition.
    ///
    /// Records the request time and opens the activity flash window before
    /// reading. A driver error or a NaN result yields an invalid reading;
    /// any other value is returned unmodified. Blocks for the duration of
    /// the driver read.
    pub fn acquire<K: Clock>(&mut self, clock: &K) -> Reading {
        let acquired_at = clock.now();
        self.activity.start(acquired_at);

        let value = match self.sensor.read_celsius() {
            Ok(celsius) if !celsius.is_nan() => Some(celsius),
            _ => None,
        };

        match value {
            Some(celsius) => trace!("sensor readout: {}", celsius),
            None => warn!("failed to read from temperature sensor"),
        }

        Reading { value, acquired_at }
    }

    /// Activity flash window opened by the last acquisition.
    pub fn activity(&self) -> &FlashWindow {
        &self.activity
    }

    /// Activity flash window (mutable, advanced by the indicator scheduler).
    pub fn activity_mut(&mut self) -> &mut FlashWindow {
        &mut self.activity
    }

    /// Underlying driver.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Underlying driver (mutable).
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
