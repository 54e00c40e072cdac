//! Low-level I2C transport for the PCA9956B.
//!
//! Sends encoded [`Frame`]s as single write transactions and tags transport
//! failures with the register they were addressed to. The chip is only ever
//! written, so there are no read primitives.
//!
//! This module is crate-private; consumers interact with
//! [`Pca9956b`](crate::Pca9956b) or [`Pca9956bAsync`](crate::Pca9956bAsync).

use crate::command::Frame;
use crate::error::BusFailure;

/// Blocking transport over `embedded-hal` 1.0.
pub(crate) struct BusDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> BusDriver<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Send one frame as one write transaction.
    ///
    /// Address phase, control byte and payload all go out in a single
    /// `write`, so the chip sees the register address exactly once.
    pub fn send(&mut self, frame: &Frame) -> Result<(), BusFailure<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("PCA9956B @ {=u8:#04x} <- {}", self.address, frame);

        self.i2c
            .write(self.address, frame.as_bytes())
            .map_err(|e| fail(frame, e))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Async transport over `embedded-hal-async` 1.0.
pub(crate) struct AsyncBusDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> AsyncBusDriver<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Async twin of [`BusDriver::send`]; puts identical bytes on the wire.
    pub async fn send(&mut self, frame: &Frame) -> Result<(), BusFailure<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("PCA9956B @ {=u8:#04x} <- {}", self.address, frame);

        self.i2c
            .write(self.address, frame.as_bytes())
            .await
            .map_err(|e| fail(frame, e))
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn fail<E: embedded_hal::i2c::Error>(frame: &Frame, error: E) -> BusFailure<E> {
    let failure = BusFailure::new(frame.register(), error);

    #[cfg(feature = "defmt")]
    defmt::warn!(
        "PCA9956B write at {} failed in {} phase",
        failure.register,
        failure.phase
    );

    failure
}
