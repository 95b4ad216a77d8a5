//! Device context and request handlers.
//!
//! `Thermostat` is the single context object owned by the control loop. It
//! bundles the range controller, the sensor proxy, the threshold hooks and
//! the indicator scheduler, and exposes the entry points the transport layer
//! and the main loop call into. Every entry point takes `&mut self`, so
//! requests and ticks are serialized by construction.

use crate::config::ThermostatConfig;
use crate::error::ControlError;
use crate::indicator::IndicatorScheduler;
use crate::io::{Clock, TemperatureSensor};
use crate::range::{OperatingRange, RangeController, RangeState, ResetOutcome, UpdateOutcome};
use crate::response::Response;
use crate::sensor::{Reading, SensorProxy};
use crate::store::{RangeStore, RecordMedium};
use crate::template::{self, PageValue, PageVar};
use crate::threshold::{self, Notification, ThresholdHooks};
use embedded_hal::digital::OutputPin;

// Sub-modules
pub mod params;

pub use params::{parse_bound, parse_range};

/// Thermostat control context.
///
/// Generic over:
/// - `M`: RecordMedium implementation (durable range record)
/// - `S`: TemperatureSensor implementation
/// - `K`: Clock implementation
/// - `H`: ThresholdHooks implementation
/// - `W`: connectivity indicator pin
/// - `A`: activity indicator pin
/// - `C`: ThermostatConfig implementation
pub struct Thermostat<M, S, K, H, W, A, C>
where
    M: RecordMedium,
    S: TemperatureSensor,
    K: Clock,
    H: ThresholdHooks,
    W: OutputPin,
    A: OutputPin,
    C: ThermostatConfig,
{
    range: RangeController<M, C>,
    sensor: SensorProxy<S>,
    clock: K,
    hooks: H,
    indicators: IndicatorScheduler<W, A, C>,
}

impl<M, S, K, H, W, A, C> core::fmt::Debug for Thermostat<M, S, K, H, W, A, C>
where
    M: RecordMedium,
    S: TemperatureSensor,
    K: Clock,
    H: ThresholdHooks,
    W: OutputPin,
    A: OutputPin,
    C: ThermostatConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Thermostat")
            .field("range", &self.range.current_range())
            .field("activity", self.sensor.activity())
            .field("connectivity_on", &self.indicators.connectivity_active())
            .field("activity_on", &self.indicators.activity_active())
            .finish_non_exhaustive()
    }
}

impl<M, S, K, H, W, A, C> Thermostat<M, S, K, H, W, A, C>
where
    M: RecordMedium,
    S: TemperatureSensor,
    K: Clock,
    H: ThresholdHooks,
    W: OutputPin,
    A: OutputPin,
    C: ThermostatConfig,
{
    /// Assemble the context and load the operating range.
    ///
    /// An unreadable record is logged and the factory range is used; the
    /// device stays operational.
    pub fn new(medium: M, sensor: S, clock: K, hooks: H, connectivity: W, activity: A) -> Self {
        let mut range = RangeController::new(RangeStore::new(medium));
        if range.bootstrap().is_err() {
            warn!("falling back to factory range");
        }

        Self {
            range,
            sensor: SensorProxy::new(sensor),
            clock,
            hooks,
            indicators: IndicatorScheduler::new(connectivity, activity),
        }
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Current operating range.
    pub fn current_range(&self) -> OperatingRange {
        self.range.current_range()
    }

    /// Lifecycle state of the durable record.
    pub fn state(&self) -> RangeState {
        self.range.state()
    }

    /// One sensor acquisition (opens the activity flash window).
    pub fn acquire(&mut self) -> Reading {
        self.sensor.acquire(&self.clock)
    }

    /// Classify `reading` against the current range and run the matching hook.
    pub fn check_thresholds(&mut self, reading: &Reading) -> Option<Notification> {
        let notification = threshold::evaluate(reading, &self.range.current_range());
        if let Some(notification) = notification {
            info!("reading outside range: {}", notification);
            threshold::dispatch(notification, &mut self.hooks);
        }
        notification
    }

    /// Set a new operating range (write-avoiding, see [`RangeController::update`]).
    pub fn update_range(&mut self, lower: i8, upper: i8) -> Result<UpdateOutcome, ControlError> {
        info!("temperature range received: [{}, {}]", lower, upper);
        self.range.update(lower, upper)
    }

    /// Factory reset (see [`RangeController::reset`]).
    pub fn reset_range(&mut self) -> Result<ResetOutcome, ControlError> {
        self.range.reset()
    }

    /// Main-loop tick: recompute and drive both indicators.
    pub fn tick(&mut self, link_up: bool) -> Result<(), ControlError> {
        let now = self.clock.now();
        self.indicators
            .tick(now, link_up, self.sensor.activity_mut())
    }

    // ========================================================================
    // Request handlers
    // ========================================================================

    /// Temperature query: acquire, check thresholds, reply with the reading.
    ///
    /// Replies `Error` (still 200) when the acquisition failed; a failed
    /// reading never triggers a hook.
    pub fn handle_temp(&mut self) -> Response {
        debug!("received temperature request");
        let reading = self.acquire();

        match reading.celsius() {
            Ok(value) => {
                self.check_thresholds(&reading);
                Response::celsius(value)
            }
            Err(_) => Response::ok("Error"),
        }
    }

    /// Range update from raw `lower`/`upper` request parameters.
    pub fn handle_save_thresholds(&mut self, lower: Option<&str>, upper: Option<&str>) -> Response {
        match parse_range(lower, upper).and_then(|(lower, upper)| self.update_range(lower, upper)) {
            Ok(_) => Response::empty(),
            Err(err) => {
                warn!("range update rejected: {}", err);
                Response::from_error(&err)
            }
        }
    }

    /// Factory reset request.
    pub fn handle_reset(&mut self) -> Response {
        match self.reset_range() {
            Ok(_) => Response::empty(),
            Err(err) => Response::from_error(&err),
        }
    }

    /// Value of one page variable. Only `Temp` touches hardware.
    pub fn resolve(&mut self, var: PageVar) -> PageValue {
        let range = self.range.current_range();
        match var {
            PageVar::Temp => match self.acquire().value {
                Some(value) => PageValue::Celsius(value),
                None => PageValue::Error,
            },
            PageVar::MinTemp => PageValue::Celsius(f32::from(C::FACTORY_LOWER)),
            PageVar::MaxTemp => PageValue::Celsius(f32::from(C::FACTORY_UPPER)),
            PageVar::LowerTemp => PageValue::Celsius(f32::from(range.lower)),
            PageVar::UpperTemp => PageValue::Celsius(f32::from(range.upper)),
        }
    }

    /// Render a page, substituting its `%TAG%` variables.
    ///
    /// Thresholds are not evaluated on this path.
    pub fn render_page<const N: usize>(
        &mut self,
        page: &str,
        out: &mut heapless::String<N>,
    ) -> Result<(), ControlError> {
        template::render(page, out, |var| self.resolve(var))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Range controller.
    pub fn range(&self) -> &RangeController<M, C> {
        &self.range
    }

    /// Durable medium.
    pub fn medium(&self) -> &M {
        self.range.store().medium()
    }

    /// Durable medium (mutable).
    pub fn medium_mut(&mut self) -> &mut M {
        self.range.store_mut().medium_mut()
    }

    /// Sensor proxy.
    pub fn sensor(&self) -> &SensorProxy<S> {
        &self.sensor
    }

    /// Sensor driver (mutable).
    pub fn sensor_mut(&mut self) -> &mut S {
        self.sensor.sensor_mut()
    }

    /// Clock.
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Clock (mutable).
    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// Threshold hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Indicator scheduler.
    pub fn indicators(&self) -> &IndicatorScheduler<W, A, C> {
        &self.indicators
    }
}
