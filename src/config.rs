//! Configuration traits and implementations for factory settings and timing.
//!
//! The `ThermostatConfig` trait fixes the factory operating range, the
//! persisted marker values and the indicator timings at compile time without
//! runtime overhead.

/// Thermostat configuration trait.
///
/// All values are const (zero runtime cost). Implementations define the
/// factory operating range restored on first boot and after a reset, the
/// bootstrap marker sentinels, and the indicator flash timings.
pub trait ThermostatConfig {
    /// Factory lower bound, in whole degrees
    const FACTORY_LOWER: i8;

    /// Factory upper bound, in whole degrees
    const FACTORY_UPPER: i8;

    /// Marker byte meaning "a range has been committed at least once" (default: 42)
    const INIT_FLAG: u8;

    /// Marker byte written on factory reset (default: 0xFF, the erased-cell value)
    const ERASED_FLAG: u8;

    /// Connectivity beacon period in milliseconds (default: 2000)
    const BEACON_PERIOD_MS: u32;

    /// Connectivity beacon on-time in milliseconds (default: 50)
    const BEACON_ON_MS: u32;

    /// Activity flash window in milliseconds (default: 50)
    const FLASH_WINDOW_MS: u32;
}

/// Default configuration: a wine cellar.
///
/// - Factory range: 10..=14 °C
/// - INIT_FLAG: 42
/// - ERASED_FLAG: 0xFF
/// - Beacon: 50 ms every 2000 ms
/// - Activity flash: 50 ms
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ThermostatConfig for DefaultConfig {
    const FACTORY_LOWER: i8 = 10;
    const FACTORY_UPPER: i8 = 14;
    const INIT_FLAG: u8 = 42;
    const ERASED_FLAG: u8 = 0xFF;
    const BEACON_PERIOD_MS: u32 = 2000;
    const BEACON_ON_MS: u32 = 50;
    const FLASH_WINDOW_MS: u32 = 50;
}

/// Configuration for a refrigerated cabinet.
///
/// Same marker and timing values as [`DefaultConfig`], colder factory range:
/// - Factory range: 2..=6 °C
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FridgeConfig;

impl ThermostatConfig for FridgeConfig {
    const FACTORY_LOWER: i8 = 2;
    const FACTORY_UPPER: i8 = 6;
    const INIT_FLAG: u8 = 42;
    const ERASED_FLAG: u8 = 0xFF;
    const BEACON_PERIOD_MS: u32 = 2000;
    const BEACON_ON_MS: u32 = 50;
    const FLASH_WINDOW_MS: u32 = 50;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(DefaultConfig::FACTORY_LOWER, 10);
        assert_eq!(DefaultConfig::FACTORY_UPPER, 14);
        assert_eq!(DefaultConfig::INIT_FLAG, 42);
        assert_eq!(DefaultConfig::ERASED_FLAG, 0xFF);
        assert_eq!(DefaultConfig::BEACON_PERIOD_MS, 2000);
        assert_eq!(DefaultConfig::BEACON_ON_MS, 50);
        assert_eq!(DefaultConfig::FLASH_WINDOW_MS, 50);
    }

    #[test]
    fn test_fridge_config() {
        assert_eq!(FridgeConfig::FACTORY_LOWER, 2);
        assert_eq!(FridgeConfig::FACTORY_UPPER, 6);
        assert_eq!(FridgeConfig::INIT_FLAG, DefaultConfig::INIT_FLAG);
        assert_eq!(FridgeConfig::ERASED_FLAG, DefaultConfig::ERASED_FLAG);
    }

    #[test]
    fn test_markers_distinct() {
        assert_ne!(DefaultConfig::INIT_FLAG, DefaultConfig::ERASED_FLAG);
        assert_ne!(FridgeConfig::INIT_FLAG, FridgeConfig::ERASED_FLAG);
    }
}
