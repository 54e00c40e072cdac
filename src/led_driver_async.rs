//! Async interface for the PCA9956B.
//!
//! [`Pca9956bAsync`] mirrors [`Pca9956b`](crate::Pca9956b) over
//! `embedded-hal-async`, for use from Embassy tasks. Both controllers share
//! the same frame encoders, so they put identical bytes on the wire.

use embedded_hal_async::i2c::I2c;

use crate::command::{
    channel_current_frame, channel_frame, fill_levels_frame, global_current_frame,
    group_dimming_frame, initialize_frames, levels_frame, validate_batch, ChannelCommand,
    ChannelCurrent,
};
use crate::driver::AsyncBusDriver;
use crate::error::LedDriverError;
use crate::led_driver::partial;
use crate::registers::{CHANNEL_COUNT, DEFAULT_CURRENT_MA};

/// Async PCA9956B controller.
///
/// Transactions, error semantics and ordering are those of
/// [`Pca9956b`](crate::Pca9956b); see there for per-method details.
///
/// # Example
///
/// ```no_run
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// use pca9956b_driver::{ChannelCommand, Pca9956bAsync, DEFAULT_ADDRESS};
///
/// let mut leds = Pca9956bAsync::new(i2c, DEFAULT_ADDRESS);
/// leds.initialize_default().await.unwrap();
/// leds.set_channel(ChannelCommand::new(23, 255)).await.unwrap();
/// # }
/// ```
pub struct Pca9956bAsync<I2C> {
    driver: AsyncBusDriver<I2C>,
}

impl<I2C> Pca9956bAsync<I2C>
where
    I2C: I2c,
{
    /// Create a controller. No I2C traffic is generated.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: AsyncBusDriver::new(i2c, address),
        }
    }

    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    pub fn release(self) -> I2C {
        self.driver.release()
    }

    /// Mode setup plus uniform output current, two block transactions.
    pub async fn initialize(
        &mut self,
        default_current_ma: u8,
    ) -> Result<(), LedDriverError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9956B init, {} mA per channel", default_current_ma);

        for frame in &initialize_frames(default_current_ma) {
            self.driver.send(frame).await?;
        }
        Ok(())
    }

    pub async fn initialize_default(&mut self) -> Result<(), LedDriverError<I2C::Error>> {
        self.initialize(DEFAULT_CURRENT_MA).await
    }

    pub async fn set_channel(
        &mut self,
        command: ChannelCommand,
    ) -> Result<(), LedDriverError<I2C::Error>> {
        let frame = channel_frame(command)?;
        self.driver.send(&frame).await?;
        Ok(())
    }

    /// One transaction per command, in order. Indices are all checked first;
    /// a bus failure reports the failed position and keeps earlier writes.
    pub async fn set_channels(
        &mut self,
        commands: &[ChannelCommand],
    ) -> Result<(), LedDriverError<I2C::Error>> {
        validate_batch(commands)?;

        for (index, &command) in commands.iter().enumerate() {
            let frame = channel_frame(command)?;
            self.driver
                .send(&frame)
                .await
                .map_err(|failure| partial(index, failure))?;
        }
        Ok(())
    }

    pub async fn set_levels(
        &mut self,
        levels: &[u8; CHANNEL_COUNT],
    ) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&levels_frame(levels)).await?;
        Ok(())
    }

    pub async fn set_all_channels(&mut self, level: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&fill_levels_frame(level)).await?;
        Ok(())
    }

    pub async fn all_off(&mut self) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_all_channels(0).await
    }

    pub async fn channel_off(&mut self, channel: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_channel(ChannelCommand::new(channel, 0)).await
    }

    pub async fn channel_full(&mut self, channel: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.set_channel(ChannelCommand::new(channel, u8::MAX)).await
    }

    pub async fn set_group_dimming(&mut self, duty: u8) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&group_dimming_frame(duty)).await?;
        Ok(())
    }

    pub async fn set_channel_current(
        &mut self,
        command: ChannelCurrent,
    ) -> Result<(), LedDriverError<I2C::Error>> {
        let frame = channel_current_frame(command)?;
        self.driver.send(&frame).await?;
        Ok(())
    }

    pub async fn set_global_current(
        &mut self,
        current_ma: u8,
    ) -> Result<(), LedDriverError<I2C::Error>> {
        self.driver.send(&global_current_frame(current_ma)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransactionPhase;
    use embassy_futures::block_on;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x3F;

    #[test]
    fn initialize_matches_blocking_sequence() {
        let mut gain = vec![0xA2];
        gain.extend_from_slice(&[89; CHANNEL_COUNT]);
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x80, 0xC0, 0x00]),
            I2cTransaction::write(ADDR, gain),
        ];
        let mut leds = Pca9956bAsync::new(I2cMock::new(&expectations), ADDR);

        block_on(leds.initialize(20)).unwrap();
        leds.release().done();
    }

    #[test]
    fn set_channel_single_register() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x0A, 50]),
            I2cTransaction::write(ADDR, vec![0x21, 255]),
        ];
        let mut leds = Pca9956bAsync::new(I2cMock::new(&expectations), ADDR);

        block_on(leds.set_channel(ChannelCommand::new(0, 50))).unwrap();
        block_on(leds.channel_full(23)).unwrap();
        assert_eq!(
            block_on(leds.set_channel(ChannelCommand::new(24, 0))),
            Err(LedDriverError::InvalidChannel(24))
        );
        leds.release().done();
    }

    #[test]
    fn set_channels_reports_failed_index() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x0A, 100]),
            I2cTransaction::write(ADDR, vec![0x0E, 200])
                .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
        ];
        let mut leds = Pca9956bAsync::new(I2cMock::new(&expectations), ADDR);

        let result = block_on(leds.set_channels(&[
            ChannelCommand::new(0, 100),
            ChannelCommand::new(4, 200),
            ChannelCommand::new(23, 20),
        ]));
        match result {
            Err(LedDriverError::PartialBatchFailure { index, failure }) => {
                assert_eq!(index, 1);
                assert_eq!(failure.phase, TransactionPhase::Address);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        leds.release().done();
    }

    #[test]
    fn current_operations() {
        let mut block = vec![0xA2];
        block.extend_from_slice(&[255; CHANNEL_COUNT]);
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x22, 22]),
            I2cTransaction::write(ADDR, block),
        ];
        let mut leds = Pca9956bAsync::new(I2cMock::new(&expectations), ADDR);

        block_on(leds.set_channel_current(ChannelCurrent::new(0, 5))).unwrap();
        block_on(leds.set_global_current(57)).unwrap();
        leds.release().done();
    }

    #[test]
    fn brightness_blocks_and_group_dimming() {
        let mut fill = vec![0x8A];
        fill.extend_from_slice(&[0; CHANNEL_COUNT]);
        let expectations = [
            I2cTransaction::write(ADDR, fill),
            I2cTransaction::write(ADDR, vec![0x08, 200]),
            I2cTransaction::write(ADDR, vec![0x0C, 0]),
        ];
        let mut leds = Pca9956bAsync::new(I2cMock::new(&expectations), ADDR);

        block_on(leds.all_off()).unwrap();
        block_on(leds.set_group_dimming(200)).unwrap();
        block_on(leds.channel_off(2)).unwrap();
        leds.release().done();
    }
}
