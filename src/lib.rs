//! # cellarstat
//!
//! Control core for a small web-controlled thermostat, with zero heap allocation.
//!
//! **Key features:**
//! - **Persistent operating range** - 3-byte record, written only when a bound changes
//! - **Bootstrap marker** - first commit flags the record, factory reset erases it
//! - **Sensor proxy** - timestamped readings, invalid readings never raise notifications
//! - **Threshold hooks** - below/above-range actions supplied by the application
//! - **Cooperative indicators** - connectivity beacon and activity flash, derived from time alone
//! - **Page variables** - closed set of `%TAG%` substitutions
//!
//! The transport (network, HTTP routing, static files) is left to the
//! application: it calls the request handlers on [`Thermostat`] and
//! [`Thermostat::tick`] from its main loop.
//!
//! ## Optional Features
//!
//! - `defmt` - Structured logging through `defmt`
//! - `imagegen` - Host tool that builds a persisted record image from a TOML file
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Lets `#[derive(Placeholder)]` expand to `::cellarstat::...` inside this crate
extern crate self as cellarstat;

// Logging macros, must come first
mod fmt;

// ============================================================================
// Module Declarations
// ============================================================================

// Configuration and platform abstractions
pub mod config;
pub mod io;

// Error handling
pub mod error;

// Durable record and range control
pub mod range;
pub mod store;

// Acquisition, classification, indicators
pub mod indicator;
pub mod sensor;
pub mod threshold;

// Request-facing layer
pub mod device;
pub mod response;
pub mod template;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Platform abstractions
pub use io::{Clock, Instant, TemperatureSensor};
pub use store::{RamMedium, RecordMedium};

// Configuration
pub use config::{DefaultConfig, FridgeConfig, ThermostatConfig};

// Error types
pub use error::{ControlError, StoreError};

// Core types
pub use indicator::{FlashWindow, IndicatorScheduler};
pub use range::{OperatingRange, RangeController, RangeState, ResetOutcome, UpdateOutcome};
pub use sensor::{Reading, SensorProxy};
pub use store::{PersistedRecord, RangeStore};
pub use threshold::{FnHooks, NoHooks, Notification, ThresholdHooks};

// Request-facing types
pub use device::Thermostat;
pub use response::Response;
pub use template::{PageValue, PageVar, Placeholder};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
