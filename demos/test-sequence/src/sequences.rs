//! Lighting sequences used to exercise the driver.
//!
//! The board carries eight RGB LEDs wired to consecutive channels in
//! red, green, blue order, so channel `3 * n + c` is colour `c` of LED `n`.
//! Every sequence borrows the controller; there is no shared global handle.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use pca9956b_driver::{ChannelCommand, LedDriverError, Pca9956bAsync, CHANNEL_COUNT};

type Result<E> = core::result::Result<(), LedDriverError<E>>;

/// Colour component of an RGB LED.
#[derive(Clone, Copy, defmt::Format)]
pub enum Colour {
    Red = 0,
    Green = 1,
    Blue = 2,
}

/// Switch every channel off.
pub async fn all_off<I2C: I2c>(leds: &mut Pca9956bAsync<I2C>) -> Result<I2C::Error> {
    leds.all_off().await
}

/// Switch every channel to full brightness.
pub async fn all_on<I2C: I2c>(leds: &mut Pca9956bAsync<I2C>) -> Result<I2C::Error> {
    leds.set_all_channels(u8::MAX).await
}

/// Fade one colour of every LED from off to full.
pub async fn fade_in<I2C: I2c>(
    leds: &mut Pca9956bAsync<I2C>,
    colour: Colour,
    step: Duration,
) -> Result<I2C::Error> {
    for level in 0..=u8::MAX {
        for channel in (colour as usize..CHANNEL_COUNT).step_by(3) {
            leds.set_channel(ChannelCommand::new(channel as u8, level))
                .await?;
        }
        Timer::after(step).await;
    }
    Ok(())
}

/// A fixed mix of channels at assorted levels.
pub async fn part_rgb<I2C: I2c>(leds: &mut Pca9956bAsync<I2C>) -> Result<I2C::Error> {
    const PATTERN: [ChannelCommand; 12] = [
        ChannelCommand::new(0, 100),
        ChannelCommand::new(4, 200),
        ChannelCommand::new(8, 50),
        ChannelCommand::new(11, 200),
        ChannelCommand::new(13, 100),
        ChannelCommand::new(15, 40),
        ChannelCommand::new(18, 100),
        ChannelCommand::new(19, 100),
        ChannelCommand::new(20, 100),
        ChannelCommand::new(21, 100),
        ChannelCommand::new(22, 200),
        ChannelCommand::new(23, 20),
    ];
    leds.set_channels(&PATTERN).await
}

/// Start-up check: first red at 50, last blue at full.
pub async fn corners<I2C: I2c>(leds: &mut Pca9956bAsync<I2C>) -> Result<I2C::Error> {
    leds.set_channel(ChannelCommand::new(0, 50)).await?;
    leds.set_channel(ChannelCommand::new(23, 255)).await
}
