//! Blocking interface for the PCA9956B.
//!
//! [`Pca9956b`] validates channel indices, encodes commands into frames and
//! sends them, one write transaction per frame. Nothing is read back and no
//! copy of the chip's registers is kept: every write is absolute.

use embedded_hal::i2c::I2c;

use crate::command::{
    channel_current_frame, channel_frame, fill_levels_frame, global_current_frame,
    group_dimming_frame, initialize_frames, levels_frame, validate_batch, ChannelCommand,
    ChannelCurrent,
};
use crate::driver::BusDriver;
use crate::error::{BusFailure, LedDriverError};
use crate::registers::{CHANNEL_COUNT, DEFAULT_CURRENT_MA};

/// Blocking PCA9956B controller.
///
/// # Example
///
/// ```no_run
/// # fn example(i2c: impl embedded_hal::i2c::I2c) {
/// use pca9956b_driver::{ChannelCommand, Pca9956b, DEFAULT_ADDRESS};
///
/// let mut leds = Pca9956b::new(i2c, DEFAULT_ADDRESS);
/// leds.initialize(20).unwrap();
///
/// leds.set_channel(ChannelCommand::new(0, 50)).unwrap();
/// leds.set_channels(&[ChannelCommand::new(4, 200), ChannelCommand::new(23, 20)])
///     .unwrap();
/// # }
/// ```
pub struct Pca9956b<I2C> {
    driver: BusDriver<I2C>,
}

impl<I2C> Pca9956b<I2C>
where
    I2C: I2c,
{
    /// Create a controller. No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address, fixed for the controller's
    ///   lifetime
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: BusDriver::new(i2c, address),
        }
    }

    /// The 7-bit bus address this controller writes to.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Put the chip into PWM-addressable mode and give every channel the same
    /// current ceiling.
    ///
    /// Sends two block transactions:
    /// 1. MODE1/MODE2 with auto-increment over MODE1..=IREF23.
    /// 2. IREF0..=IREF23, all set to `current_to_gain(default_current_ma)`.
    ///
    /// A failed first write skips the second. Since both writes are absolute,
    /// calling `initialize` again after a failure is always safe.
    ///
    /// # Errors
    /// * [`LedDriverError::BusTransactionFailed`] on communication failure
    pub fn initialize(&mut self, default_current_ma: u8) -> Result<(), LedDriverError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9956B init, {} mA per channel", default_current_ma);

        for frame in &initialize_frames(default_current_ma) {
            self.driver.send(frame)?;
        }
        Ok(())
    }

    /// [`initialize`](Self::initialize) with [`DEFAULT_CURRENT_MA`].
    pub fn initialize_default(&mut self) -> Result<(), LedDriverError<I2C::Error>> {
        self.initialize(DEFAULT_CURRENT_MA)
    }

    // -----------------------------------------------------------------------
    // Brightness
    // -----------------------------------------------------------------------

    /// Set one channel's brightness with a single-register write.
    ///
    /// # Errors
    /// * [`LedDriverError::InvalidChannel`] if `command.channel >= 24`;
    ///   nothing is sent
    /// * [`LedDriverError::BusTransactionFailed`] on communication failure
    pub fn set_channel(&mut self, command: ChannelCommand) -> Result<(), LedDriverError<I2C::Error>> {
        let frame = channel_frame(command)?;
        self.driver.send(&frame)?;
        Ok(())
    }

    /// Apply several channel commands in order, one transaction each.
    ///
    /// The channels are arbitrary and usually not contiguous, so a block write
    /// cannot be used. All indices are checked before anything is sent.
    ///
    /// # Errors
    /// * [`LedDriverError::InvalidChannel`] for the first out-of-range entry;
    ///   nothing is sent
    /// * [`LedDriverError::PartialBatchFailure`] with the position of the first
    ///   failed transaction. Earlier commands stay applied; nothing is rolled
    ///   back.
    pub fn set_channels(
        &mut self,
        commands: &[ChannelCommand],
    ) -> Result<(), LedDriverError<I2C::Error>> {
        validate_batch(commands)?;

        for (index, &command) in commands.iter().enumerate() {
            let frame = channel_frame(command)?;
            self.driver
                .send(&frame)
                .map_err(|failure| partial(index, failure))?;
        }
        Ok(())
    }

    /// Set all 24 channels from `levels` (indexed by channel) in one block
    /// transaction.
    pub fn set_levels(
        &mut self,
        levels: &[u8; CHANNEL_COUNT],
    ) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&levels_frame(levels))?;
        Ok(())
    }

    /// Set every channel to the same brightness in one block transaction.
    pub fn set_all_channels(&mut self, level: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&fill_levels_frame(level))?;
        Ok(())
    }

    /// Switch every channel off.
    pub fn all_off(&mut self) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_all_channels(0)
    }

    /// Switch one channel off (PWM duty 0).
    pub fn channel_off(&mut self, channel: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_channel(ChannelCommand::new(channel, 0))
    }

    /// Drive one channel at full duty.
    pub fn channel_full(&mut self, channel: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_channel(ChannelCommand::new(channel, u8::MAX))
    }

    /// Set the group duty cycle (GRPPWM).
    pub fn set_group_dimming(&mut self, duty: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&group_dimming_frame(duty))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Output current
    // -----------------------------------------------------------------------

    /// Set one channel's peak output current.
    ///
    /// # Errors
    /// * [`LedDriverError::InvalidChannel`] if `command.channel >= 24`
    /// * [`LedDriverError::BusTransactionFailed`] on communication failure
    pub fn set_channel_current(
        &mut self,
        command: ChannelCurrent,
    ) -> Result<(), LedDriverError<I2C::Error>> {
        let frame = channel_current_frame(command)?;
        self.driver.send(&frame)?;
        Ok(())
    }

    /// Set the same peak output current on every channel in one block
    /// transaction.
    pub fn set_global_current(&mut self, current_ma: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&global_current_frame(current_ma))?;
        Ok(())
    }
}

pub(crate) fn partial<E>(index: usize, failure: BusFailure<E>) -> LedDriverError<E> {
    LedDriverError::PartialBatchFailure { index, failure }
}
