//! Durable operating-range record.
//!
//! The record is a fixed 3-byte flat layout on a byte-addressed medium
//! (EEPROM emulation, FRAM, a flash page...):
//!
//! | slot | content                                         |
//! |------|-------------------------------------------------|
//! | 0    | bootstrap marker (`INIT_FLAG` = initialized)     |
//! | 1    | lower bound, `i8` two's complement               |
//! | 2    | upper bound, `i8` two's complement               |
//!
//! Writes are staged. Nothing is durable until [`RangeStore::commit`]
//! returns `Ok`.

use crate::error::StoreError;

/// Size of the persisted record in bytes.
pub const RECORD_SIZE: usize = 3;

/// Byte-addressed durable medium.
///
/// `write_byte` only stages the value; `commit` makes every staged byte
/// durable at once. Reads observe staged values.
pub trait RecordMedium {
    /// Platform-specific error type
    type Error;

    /// Read one byte.
    fn read_byte(&mut self, addr: u8) -> Result<u8, Self::Error>;

    /// Stage one byte.
    fn write_byte(&mut self, addr: u8, value: u8) -> Result<(), Self::Error>;

    /// Make all staged bytes durable.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Record slot.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Bootstrap marker (slot 0)
    Marker = 0,

    /// Lower bound (slot 1)
    Lower = 1,

    /// Upper bound (slot 2)
    Upper = 2,
}

impl Field {
    /// Slot address on the medium.
    pub const fn slot(self) -> u8 {
        self as u8
    }
}

/// Raw content of the durable record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedRecord {
    /// Bootstrap marker byte
    pub marker: u8,

    /// Lower bound
    pub lower: i8,

    /// Upper bound
    pub upper: i8,
}

impl PersistedRecord {
    /// Record image as stored on the medium.
    pub const fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        [self.marker, self.lower as u8, self.upper as u8]
    }

    /// Decode a record image.
    pub const fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        Self {
            marker: bytes[0],
            lower: bytes[1] as i8,
            upper: bytes[2] as i8,
        }
    }

    /// True when the marker equals `init_flag`.
    pub const fn is_initialized(&self, init_flag: u8) -> bool {
        self.marker == init_flag
    }
}

/// Range store over a [`RecordMedium`].
///
/// Owns the read / stage / commit protocol. Medium errors are mapped to
/// [`StoreError`], keeping the failing slot.
#[derive(Debug)]
pub struct RangeStore<M: RecordMedium> {
    medium: M,
}

impl<M: RecordMedium> RangeStore<M> {
    /// Wrap a medium.
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// Read the full record.
    pub fn read_record(&mut self) -> Result<PersistedRecord, StoreError> {
        let marker = self.read_slot(Field::Marker)?;
        let lower = self.read_slot(Field::Lower)?;
        let upper = self.read_slot(Field::Upper)?;
        Ok(PersistedRecord::from_bytes([marker, lower, upper]))
    }

    /// Stage a raw byte into one slot.
    pub fn write_field(&mut self, field: Field, value: u8) -> Result<(), StoreError> {
        self.medium
            .write_byte(field.slot(), value)
            .map_err(|_| StoreError::Write { slot: field.slot() })
    }

    /// Make staged writes durable.
    pub fn commit(&mut self) -> Result<(), StoreError> {
        self.medium.commit().map_err(|_| StoreError::Commit)
    }

    /// Underlying medium.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Underlying medium (mutable).
    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    /// Unwrap the medium.
    pub fn into_inner(self) -> M {
        self.medium
    }

    fn read_slot(&mut self, field: Field) -> Result<u8, StoreError> {
        self.medium
            .read_byte(field.slot())
            .map_err(|_| StoreError::Read { slot: field.slot() })
    }
}

/// Address outside the medium.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds;

/// RAM-backed medium with separate staged and committed images.
///
/// Starts erased (`0xFF`). Useful on hosts and for building record images.
#[derive(Debug, Clone)]
pub struct RamMedium<const N: usize> {
    staged: [u8; N],
    committed: [u8; N],
    commits: usize,
}

impl<const N: usize> RamMedium<N> {
    /// Erased medium.
    pub const fn new() -> Self {
        Self::from_image([0xFF; N])
    }

    /// Medium whose durable content is `image`.
    pub const fn from_image(image: [u8; N]) -> Self {
        Self {
            staged: image,
            committed: image,
            commits: 0,
        }
    }

    /// Durable content.
    pub fn committed(&self) -> &[u8; N] {
        &self.committed
    }

    /// Number of successful commits.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Drop every staged byte that was not committed.
    pub fn power_cycle(&mut self) {
        self.staged = self.committed;
    }
}

impl<const N: usize> Default for RamMedium<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RecordMedium for RamMedium<N> {
    type Error = OutOfBounds;

    fn read_byte(&mut self, addr: u8) -> Result<u8, Self::Error> {
        self.staged.get(addr as usize).copied().ok_or(OutOfBounds)
    }

    fn write_byte(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        let cell = self.staged.get_mut(addr as usize).ok_or(OutOfBounds)?;
        *cell = value;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.committed = self.staged;
        self.commits += 1;
        Ok(())
    }
}
