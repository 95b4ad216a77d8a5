//! Test fixtures and utilities for cellarstat testing.
//!
//! Provides:
//! - `MockMedium`: RecordMedium with write log and fault injection
//! - `MockSensor`: scripted TemperatureSensor
//! - `MockClock`: settable Clock
//! - `MockPin`: OutputPin recording its level history
//! - `RecordingHooks`: ThresholdHooks counting invocations

#![allow(dead_code)]

use cellarstat::store::RECORD_SIZE;
use cellarstat::{Clock, Instant, RecordMedium, TemperatureSensor, ThresholdHooks};
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};
use std::collections::VecDeque;

// ============================================================================
// MockMedium - Durable Record Implementation
// ============================================================================

/// Injected medium failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MediumFault;

/// Mock durable medium.
///
/// Keeps staged and committed images apart, logs every staged write and can
/// be told to fail reads, writes to one slot, or commits.
#[derive(Debug)]
pub struct MockMedium {
    staged: [u8; RECORD_SIZE],
    committed: [u8; RECORD_SIZE],

    /// Every staged write, as (slot, value)
    pub writes: Vec<(u8, u8)>,

    /// Number of successful commits
    pub commits: usize,

    /// Fail every read
    pub fail_reads: bool,

    /// Fail writes to this slot
    pub fail_write_slot: Option<u8>,

    /// Fail every commit
    pub fail_commits: bool,
}

impl MockMedium {
    /// Erased medium (all `0xFF`).
    pub fn erased() -> Self {
        Self::with_image([0xFF; RECORD_SIZE])
    }

    /// Medium holding `image` durably.
    pub fn with_image(image: [u8; RECORD_SIZE]) -> Self {
        Self {
            staged: image,
            committed: image,
            writes: Vec::new(),
            commits: 0,
            fail_reads: false,
            fail_write_slot: None,
            fail_commits: false,
        }
    }

    /// Medium holding an initialized record with the given bounds.
    pub fn initialized(lower: i8, upper: i8) -> Self {
        Self::with_image([42, lower as u8, upper as u8])
    }

    /// Durable content.
    pub fn committed(&self) -> [u8; RECORD_SIZE] {
        self.committed
    }

    /// Slots written since creation (or the last `clear_log`).
    pub fn written_slots(&self) -> Vec<u8> {
        self.writes.iter().map(|&(slot, _)| slot).collect()
    }

    /// Forget the write log and commit count.
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.commits = 0;
    }

    /// Drop staged bytes, as after a power loss.
    pub fn power_cycle(&mut self) {
        self.staged = self.committed;
    }

    /// Total store interactions (staged writes plus commits).
    pub fn interactions(&self) -> usize {
        self.writes.len() + self.commits
    }
}

impl RecordMedium for MockMedium {
    type Error = MediumFault;

    fn read_byte(&mut self, addr: u8) -> Result<u8, Self::Error> {
        if self.fail_reads {
            return Err(MediumFault);
        }
        self.staged.get(addr as usize).copied().ok_or(MediumFault)
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        if self.fail_write_slot == Some(addr) {
            return Err(MediumFault);
        }
        let cell = self.staged.get_mut(addr as usize).ok_or(MediumFault)?;
        *cell = value;
        self.writes.push((addr, value));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        if self.fail_commits {
            return Err(MediumFault);
        }
        self.committed = self.staged;
        self.commits += 1;
        Ok(())
    }
}

// ============================================================================
// MockSensor - Scripted Temperature Sensor
// ============================================================================

/// Driver failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SensorTimeout;

/// Scripted sensor.
///
/// Returns queued results first, then `fallback` forever.
#[derive(Debug)]
pub struct MockSensor {
    queue: VecDeque<Result<f32, SensorTimeout>>,

    /// Result once the queue is empty
    pub fallback: Result<f32, SensorTimeout>,

    /// Number of reads performed
    pub reads: usize,
}

impl MockSensor {
    /// Sensor that always reads `celsius`.
    pub fn reading(celsius: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: Ok(celsius),
            reads: 0,
        }
    }

    /// Sensor that always fails.
    pub fn failing() -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: Err(SensorTimeout),
            reads: 0,
        }
    }

    /// Queue one result.
    pub fn push(&mut self, result: Result<f32, SensorTimeout>) {
        self.queue.push_back(result);
    }
}

impl TemperatureSensor for MockSensor {
    type Error = SensorTimeout;

    fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        self.reads += 1;
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

// ============================================================================
// MockClock - Settable Clock
// ============================================================================

/// Clock whose time only moves when told to.
#[derive(Debug, Default)]
pub struct MockClock {
    now_ms: u32,
}

impl MockClock {
    /// Clock at `ms`.
    pub fn at(ms: u32) -> Self {
        Self { now_ms: ms }
    }

    /// Jump to `ms`.
    pub fn set(&mut self, ms: u32) {
        self.now_ms = ms;
    }

    /// Move forward by `ms` (wrapping).
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms)
    }
}

// ============================================================================
// MockPin - Indicator Output
// ============================================================================

/// Output pin recording every level it was driven to.
#[derive(Debug, Default)]
pub struct MockPin {
    /// Current level
    pub high: bool,

    /// Every level written, in order
    pub history: Vec<bool>,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.history.push(true);
        Ok(())
    }
}

/// Pin error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Output pin that always fails.
#[derive(Debug, Default)]
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

// ============================================================================
// RecordingHooks - Threshold Notification Capture
// ============================================================================

/// Hooks counting how often each side fired.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    /// Below-range invocations
    pub below: usize,

    /// Above-range invocations
    pub above: usize,
}

impl RecordingHooks {
    /// Total invocations.
    pub fn total(&self) -> usize {
        self.below + self.above
    }
}

impl ThresholdHooks for RecordingHooks {
    fn on_below_range(&mut self) {
        self.below += 1;
    }

    fn on_above_range(&mut self) {
        self.above += 1;
    }
}
