//! Cooperative status-indicator scheduler.
//!
//! Both indicators are recomputed from elapsed time on every control-loop
//! tick. Nothing here blocks, sleeps or allocates.
//!
//! - Connectivity: short beacon flash every `BEACON_PERIOD_MS` while the link
//!   is up. Stateless, derived from `now` alone.
//! - Activity: one-shot flash of `FLASH_WINDOW_MS` opened by each sensor
//!   acquisition, see [`FlashWindow`].

use crate::config::ThermostatConfig;
use crate::error::ControlError;
use crate::io::Instant;
use core::marker::PhantomData;
use embedded_hal::digital::{OutputPin, PinState};

/// One-shot decaying flash.
///
/// Opened with [`start`](FlashWindow::start), closed by the first
/// [`update`](FlashWindow::update) that sees the window elapsed. Stays closed
/// until the next `start`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashWindow {
    active: bool,
    window_start: Option<Instant>,
}

impl FlashWindow {
    /// Closed window.
    pub const fn new() -> Self {
        Self {
            active: false,
            window_start: None,
        }
    }

    /// Open the window at `now` (restarts a window already open).
    pub fn start(&mut self, now: Instant) {
        self.active = true;
        self.window_start = Some(now);
    }

    /// Recompute the state at `now` and return it.
    pub fn update(&mut self, now: Instant, window_ms: u32) -> bool {
        if let Some(start) = self.window_start
            && self.active
        {
            self.active = now.elapsed_since(start) < window_ms;
            if !self.active {
                self.window_start = None;
            }
        }
        self.active
    }

    /// Current state, as of the last `start`/`update`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start of the open window.
    pub fn window_start(&self) -> Option<Instant> {
        self.window_start
    }
}

/// Connectivity beacon state at `now`: on for the first `BEACON_ON_MS` of
/// every `BEACON_PERIOD_MS`.
pub fn beacon_active<C: ThermostatConfig>(now: Instant) -> bool {
    now.as_millis() % C::BEACON_PERIOD_MS < C::BEACON_ON_MS
}

/// Drives the connectivity and activity indicator outputs.
///
/// Generic over:
/// - `W`: connectivity indicator pin
/// - `A`: activity indicator pin
/// - `C`: ThermostatConfig implementation (timings)
#[derive(Debug)]
pub struct IndicatorScheduler<W, A, C>
where
    W: OutputPin,
    A: OutputPin,
    C: ThermostatConfig,
{
    connectivity: W,
    activity: A,
    connectivity_on: bool,
    activity_on: bool,
    _config: PhantomData<C>,
}

impl<W, A, C> IndicatorScheduler<W, A, C>
where
    W: OutputPin,
    A: OutputPin,
    C: ThermostatConfig,
{
    /// Take ownership of both indicator pins. Outputs are driven from the
    /// first tick on.
    pub fn new(connectivity: W, activity: A) -> Self {
        Self {
            connectivity,
            activity,
            connectivity_on: false,
            activity_on: false,
            _config: PhantomData,
        }
    }

    /// Recompute and drive both outputs.
    ///
    /// `link_up` is the connectivity status reported by the transport layer;
    /// the beacon stays dark while the link is down.
    pub fn tick(
        &mut self,
        now: Instant,
        link_up: bool,
        window: &mut FlashWindow,
    ) -> Result<(), ControlError> {
        self.connectivity_on = link_up && beacon_active::<C>(now);
        self.activity_on = window.update(now, C::FLASH_WINDOW_MS);

        self.connectivity
            .set_state(PinState::from(self.connectivity_on))
            .map_err(|_| ControlError::IndicatorFault)?;
        self.activity
            .set_state(PinState::from(self.activity_on))
            .map_err(|_| ControlError::IndicatorFault)?;

        Ok(())
    }

    /// Connectivity output level set by the last tick.
    pub fn connectivity_active(&self) -> bool {
        self.connectivity_on
    }

    /// Activity output level set by the last tick.
    pub fn activity_active(&self) -> bool {
        self.activity_on
    }

    /// Connectivity pin.
    pub fn connectivity_pin(&self) -> &W {
        &self.connectivity
    }

    /// Activity pin.
    pub fn activity_pin(&self) -> &A {
        &self.activity
    }
}
