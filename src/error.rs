//! Error types for control operations.
//!
//! `StoreError` describes which step of the durable-medium protocol failed.
//! `ControlError` is the error surfaced by every fallible core operation.
//! None of them is fatal: the device keeps serving requests after any of them.

use core::fmt;

/// Durable-medium fault.
///
/// Platform error detail is dropped at the store boundary; only the failing
/// step and slot are kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Reading a slot failed
    Read {
        /// Slot address
        slot: u8,
    },

    /// Staging a write to a slot failed
    Write {
        /// Slot address
        slot: u8,
    },

    /// Commit to the durable medium failed
    Commit,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { slot } => write!(f, "Store read failed at slot {}", slot),
            StoreError::Write { slot } => write!(f, "Store write failed at slot {}", slot),
            StoreError::Commit => write!(f, "Store commit failed"),
        }
    }
}

/// Control error type.
///
/// Represents every error condition of the control core.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Sensor acquisition returned no valid value
    SensorFault,

    /// Durable-medium read/write/commit failure
    ///
    /// The in-memory range may disagree with the durable record until the
    /// next successful update or reset.
    StoreFault(StoreError),

    /// Request parameter missing or not a whole-degree number
    MalformedRequest {
        /// Parameter name (e.g. "lower")
        parameter: &'static str,
    },

    /// Indicator output pin could not be driven
    IndicatorFault,

    /// Output buffer capacity exceeded
    BufferFull,
}

impl From<StoreError> for ControlError {
    fn from(err: StoreError) -> Self {
        ControlError::StoreFault(err)
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::SensorFault => write!(f, "Sensor read failed"),
            ControlError::StoreFault(err) => write!(f, "{}", err),
            ControlError::MalformedRequest { parameter } => {
                write!(f, "Missing or invalid parameter: {}", parameter)
            }
            ControlError::IndicatorFault => write!(f, "Indicator output failed"),
            ControlError::BufferFull => write!(f, "Buffer full"),
        }
    }
}
