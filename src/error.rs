//! Error types for the PCA9956B driver.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::registers::{InvalidChannel, RegisterAddress};

/// Which part of a write transaction the bus reported as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionPhase {
    /// The device did not acknowledge its address.
    Address,
    /// The device did not acknowledge a control or payload byte.
    Data,
    /// Any other bus fault (arbitration loss, overrun, unknown).
    Bus,
}

impl TransactionPhase {
    /// Classify a transport error by its `embedded-hal` kind.
    pub fn of<E: embedded_hal::i2c::Error>(error: &E) -> Self {
        match error.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => TransactionPhase::Address,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => TransactionPhase::Data,
            _ => TransactionPhase::Bus,
        }
    }
}

/// A failed write transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct BusFailure<E> {
    /// Control byte the transaction started with.
    pub register: RegisterAddress,
    /// Where the transaction failed.
    pub phase: TransactionPhase,
    /// The transport's own error.
    pub source: E,
}

impl<E: embedded_hal::i2c::Error> BusFailure<E> {
    pub(crate) fn new(register: RegisterAddress, source: E) -> Self {
        Self {
            register,
            phase: TransactionPhase::of(&source),
            source,
        }
    }
}

/// Errors that can occur when driving the PCA9956B.
#[derive(Debug, Clone, PartialEq)]
pub enum LedDriverError<E> {
    /// Channel index out of range (must be 0-23). Nothing was sent.
    InvalidChannel(u8),

    /// A write transaction failed.
    BusTransactionFailed(BusFailure<E>),

    /// A transaction inside [`set_channels`](crate::Pca9956b::set_channels)
    /// failed. Commands before `index` have already been applied.
    PartialBatchFailure {
        /// Position of the failed command in the batch.
        index: usize,
        failure: BusFailure<E>,
    },
}

impl<E> From<InvalidChannel> for LedDriverError<E> {
    fn from(InvalidChannel(index): InvalidChannel) -> Self {
        LedDriverError::InvalidChannel(index)
    }
}

impl<E> From<BusFailure<E>> for LedDriverError<E> {
    fn from(failure: BusFailure<E>) -> Self {
        LedDriverError::BusTransactionFailed(failure)
    }
}

impl<E: fmt::Debug> fmt::Display for LedDriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedDriverError::InvalidChannel(index) => {
                write!(f, "Invalid channel index {} (must be 0-23)", index)
            }
            LedDriverError::BusTransactionFailed(failure) => write!(
                f,
                "I2C write at {} failed ({:?}): {:?}",
                failure.register, failure.phase, failure.source
            ),
            LedDriverError::PartialBatchFailure { index, failure } => write!(
                f,
                "Batch command {} failed at {} ({:?}): {:?}",
                index, failure.register, failure.phase, failure.source
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for LedDriverError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LedDriverError::InvalidChannel(index) => {
                defmt::write!(f, "Invalid channel index {}", index)
            }
            LedDriverError::BusTransactionFailed(failure) => defmt::write!(
                f,
                "I2C write at {} failed ({}): {}",
                failure.register,
                failure.phase,
                failure.source
            ),
            LedDriverError::PartialBatchFailure { index, failure } => defmt::write!(
                f,
                "Batch command {} failed at {} ({}): {}",
                index,
                failure.register,
                failure.phase,
                failure.source
            ),
        }
    }
}
