//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{BrokenPin, MockClock, MockMedium, MockPin, MockSensor, RecordingHooks};
use cellarstat::{DefaultConfig, Thermostat};

/// Thermostat wired to mocks with the default (wine cellar) configuration.
pub type TestThermostat =
    Thermostat<MockMedium, MockSensor, MockClock, RecordingHooks, MockPin, MockPin, DefaultConfig>;

// ============================================================================
// Thermostat Creation Helpers
// ============================================================================

/// Thermostat over `medium`, sensor reading `celsius`, clock at 0.
///
/// The bootstrap reads are done; the medium's write log is empty.
pub fn create_thermostat(medium: MockMedium, celsius: f32) -> TestThermostat {
    Thermostat::new(
        medium,
        MockSensor::reading(celsius),
        MockClock::at(0),
        RecordingHooks::default(),
        MockPin::default(),
        MockPin::default(),
    )
}

/// Thermostat on an erased medium.
pub fn fresh_thermostat() -> TestThermostat {
    create_thermostat(MockMedium::erased(), 12.0)
}

/// Thermostat holding a committed `[lower, upper]` range.
pub fn configured_thermostat(lower: i8, upper: i8) -> TestThermostat {
    create_thermostat(MockMedium::initialized(lower, upper), 12.0)
}

/// Power-cycle the medium and boot a new thermostat on its durable content.
pub fn reboot(thermostat: TestThermostat) -> TestThermostat {
    let medium = MockMedium::with_image(thermostat.medium().committed());
    create_thermostat(medium, 12.0)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the current range.
pub fn assert_range(thermostat: &TestThermostat, lower: i8, upper: i8) {
    let range = thermostat.current_range();
    assert_eq!(
        (range.lower, range.upper),
        (lower, upper),
        "unexpected range {:?}",
        range
    );
}

/// Assert the durable record content.
pub fn assert_committed(thermostat: &TestThermostat, image: [u8; 3]) {
    assert_eq!(
        thermostat.medium().committed(),
        image,
        "unexpected durable record"
    );
}
