//! Operating range and its controller.
//!
//! [`RangeController`] holds the authoritative in-memory [`OperatingRange`]
//! and reconciles it with the durable record. It writes only what changed,
//! flags the record as initialized on the first commit ever, and erases that
//! flag on factory reset.

use crate::config::ThermostatConfig;
use crate::error::ControlError;
use crate::store::{Field, RangeStore, RecordMedium};
use core::marker::PhantomData;

/// Operator-set band used for threshold classification.
///
/// Bounds are inclusive whole degrees. `lower <= upper` is not enforced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperatingRange {
    /// Inclusive lower limit
    pub lower: i8,

    /// Inclusive upper limit
    pub upper: i8,

    /// True once a range has ever been durably committed
    pub bootstrapped: bool,
}

impl OperatingRange {
    /// Factory range of configuration `C` (not bootstrapped).
    pub const fn factory<C: ThermostatConfig>() -> Self {
        Self {
            lower: C::FACTORY_LOWER,
            upper: C::FACTORY_UPPER,
            bootstrapped: false,
        }
    }

    /// True when `value` lies within `[lower, upper]`.
    pub fn contains(&self, value: f32) -> bool {
        value >= f32::from(self.lower) && value <= f32::from(self.upper)
    }
}

/// Lifecycle of the durable record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeState {
    /// No range has ever been committed (or the record was reset)
    Uninitialized,

    /// The record holds an operator-set range
    Initialized,
}

/// Result of [`RangeController::update`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateOutcome {
    /// Both bounds already matched; the store was not touched
    Unchanged,

    /// Changed fields were staged and committed once
    Committed {
        /// Lower slot was written
        lower_changed: bool,
        /// Upper slot was written
        upper_changed: bool,
        /// Marker slot was written (first commit ever)
        marker_written: bool,
    },
}

/// Result of [`RangeController::reset`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetOutcome {
    /// The marker was erased and committed
    Erased,

    /// Nothing had been stored; only the in-memory range was reset
    AlreadyFactory,
}

/// Owner of the operating range.
///
/// Generic over:
/// - `M`: RecordMedium implementation
/// - `C`: ThermostatConfig implementation
///
/// All mutation goes through `&mut self`, so a single control loop is the
/// only writer.
#[derive(Debug)]
pub struct RangeController<M: RecordMedium, C: ThermostatConfig> {
    store: RangeStore<M>,
    range: OperatingRange,
    _config: PhantomData<C>,
}

impl<M: RecordMedium, C: ThermostatConfig> RangeController<M, C> {
    /// Controller holding the factory range. Performs no I/O.
    pub fn new(store: RangeStore<M>) -> Self {
        Self {
            store,
            range: OperatingRange::factory::<C>(),
            _config: PhantomData,
        }
    }

    /// Load the range from the durable record.
    ///
    /// With a valid marker the persisted bounds are taken as-is (they are
    /// not clamped into the factory range). Otherwise the factory range is
    /// kept and nothing is written. On a read failure the controller keeps
    /// the factory range.
    pub fn bootstrap(&mut self) -> Result<RangeState, ControlError> {
        let record = self.store.read_record().inspect_err(|err| {
            error!("range store unreadable: {}", err);
        })?;

        debug!(
            "record [marker={}, lower={}, upper={}]",
            record.marker,
            record.lower,
            record.upper
        );

        self.range = if record.is_initialized(C::INIT_FLAG) {
            OperatingRange {
                lower: record.lower,
                upper: record.upper,
                bootstrapped: true,
            }
        } else {
            OperatingRange::factory::<C>()
        };

        info!(
            "temperature range set to [{}, {}]",
            self.range.lower,
            self.range.upper
        );

        Ok(self.state())
    }

    /// Current in-memory range.
    pub fn current_range(&self) -> OperatingRange {
        self.range
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RangeState {
        if self.range.bootstrapped {
            RangeState::Initialized
        } else {
            RangeState::Uninitialized
        }
    }

    /// True once a range has been committed.
    pub fn is_bootstrapped(&self) -> bool {
        self.range.bootstrapped
    }

    /// Set a new range, writing only the bounds that differ from the
    /// in-memory range.
    ///
    /// When at least one bound changed and the record was uninitialized, both
    /// bounds and the marker are staged, then the store is committed exactly
    /// once.
    /// When nothing changed the store is not touched at all.
    ///
    /// A store fault aborts the operation. Bounds already staged stay updated
    /// in memory, so memory may disagree with the durable record until the
    /// next successful update or reset.
    pub fn update(&mut self, lower: i8, upper: i8) -> Result<UpdateOutcome, ControlError> {
        let lower_changed = lower != self.range.lower;
        let upper_changed = upper != self.range.upper;

        if !lower_changed && !upper_changed {
            info!("range [{}, {}] already stored (no change)", lower, upper);
            return Ok(UpdateOutcome::Unchanged);
        }

        // An uninitialized record may still hold stale or erased bounds
        let marker_written = !self.range.bootstrapped;
        let write_lower = lower_changed || marker_written;
        let write_upper = upper_changed || marker_written;

        if write_lower {
            self.range.lower = lower;
            self.stage(Field::Lower, lower as u8)?;
        }

        if write_upper {
            self.range.upper = upper;
            self.stage(Field::Upper, upper as u8)?;
        }

        if marker_written {
            self.stage(Field::Marker, C::INIT_FLAG)?;
            self.range.bootstrapped = true;
        }

        self.commit()?;
        info!("range [{}, {}] stored", self.range.lower, self.range.upper);

        Ok(UpdateOutcome::Committed {
            lower_changed: write_lower,
            upper_changed: write_upper,
            marker_written,
        })
    }

    /// Factory reset.
    ///
    /// Erases the marker (one commit) when a range had been stored, then
    /// restores the factory range in memory. Resetting an uninitialized
    /// controller performs no store interaction. On a store fault the
    /// in-memory range is left untouched so the reset can be retried.
    pub fn reset(&mut self) -> Result<ResetOutcome, ControlError> {
        let outcome = if self.range.bootstrapped {
            self.stage(Field::Marker, C::ERASED_FLAG)?;
            self.commit()?;
            ResetOutcome::Erased
        } else {
            ResetOutcome::AlreadyFactory
        };

        self.range = OperatingRange::factory::<C>();
        info!(
            "factory reset, range set to [{}, {}]",
            self.range.lower,
            self.range.upper
        );

        Ok(outcome)
    }

    /// Underlying store.
    pub fn store(&self) -> &RangeStore<M> {
        &self.store
    }

    /// Underlying store (mutable).
    pub fn store_mut(&mut self) -> &mut RangeStore<M> {
        &mut self.store
    }

    fn stage(&mut self, field: Field, value: u8) -> Result<(), ControlError> {
        self.store.write_field(field, value).inspect_err(|err| {
            error!("staging {} failed: {}", field, err);
        })?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), ControlError> {
        self.store.commit().inspect_err(|err| {
            error!("commit failed: {}", err);
        })?;
        Ok(())
    }
}
