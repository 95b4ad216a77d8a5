//! Threshold evaluation and notification hooks.
//!
//! [`evaluate`] is a pure decision. The caller forwards a non-`None` result to
//! exactly one hook with [`dispatch`]. Hooks are fire-and-forget: they return
//! nothing and have no failure mode.

use crate::range::OperatingRange;
use crate::sensor::Reading;

/// Which side of the operating range a reading fell on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Reading strictly below the lower bound
    BelowRange,

    /// Reading strictly above the upper bound
    AboveRange,
}

/// Classify a reading against a range.
///
/// Invalid readings never produce a notification. Bounds are inclusive.
pub fn evaluate(reading: &Reading, range: &OperatingRange) -> Option<Notification> {
    let value = reading.value?;

    if value < f32::from(range.lower) {
        Some(Notification::BelowRange)
    } else if value > f32::from(range.upper) {
        Some(Notification::AboveRange)
    } else {
        None
    }
}

/// Application actions run when a reading leaves the operating range.
pub trait ThresholdHooks {
    /// Reading fell below the lower bound.
    fn on_below_range(&mut self);

    /// Reading rose above the upper bound.
    fn on_above_range(&mut self);
}

/// Invoke the hook matching `notification`.
pub fn dispatch<H: ThresholdHooks + ?Sized>(notification: Notification, hooks: &mut H) {
    match notification {
        Notification::BelowRange => hooks.on_below_range(),
        Notification::AboveRange => hooks.on_above_range(),
    }
}

/// Hooks that do nothing.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoHooks;

impl ThresholdHooks for NoHooks {
    fn on_below_range(&mut self) {}

    fn on_above_range(&mut self) {}
}

/// Hooks backed by two closures.
#[derive(Debug)]
pub struct FnHooks<B, A> {
    below: B,
    above: A,
}

impl<B: FnMut(), A: FnMut()> FnHooks<B, A> {
    /// Build hooks from a below-range and an above-range action.
    pub fn new(below: B, above: A) -> Self {
        Self { below, above }
    }
}

impl<B: FnMut(), A: FnMut()> ThresholdHooks for FnHooks<B, A> {
    fn on_below_range(&mut self) {
        (self.below)()
    }

    fn on_above_range(&mut self) {
        (self.above)()
    }
}
