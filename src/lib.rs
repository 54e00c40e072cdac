//! Driver for the NXP PCA9956B 24-channel constant-current LED driver.
//!
//! This crate is the command layer above an I2C bus: it maps channel
//! brightness and output current requests onto the chip's byte-addressed
//! register space and sends them as write transactions through any
//! `embedded-hal` 1.0 I2C implementation, blocking or async.
//!
//! # Architecture
//!
//! - **[`registers`]** — register addresses, the auto-increment control bit,
//!   MODE1 auto-increment scopes and channel-to-register arithmetic.
//! - **[`current`]** — milliamp to gain code conversion.
//! - **[`command`]** — encodes requests into [`Frame`]s, the exact bytes of
//!   one transaction (single register or auto-increment block).
//! - **`driver`** (crate-private) — sends frames and tags bus failures with
//!   the register and transaction phase.
//! - **[`Pca9956b`]** / **[`Pca9956bAsync`]** (public) — validated,
//!   high-level API.
//!
//! The chip is write-only as far as this crate is concerned: no register
//! contents are read back or cached.
//!
//! # Quick start
//!
//! ```no_run
//! # fn example<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), pca9956b_driver::LedDriverError<I2C::Error>> {
//! use pca9956b_driver::{ChannelCommand, Pca9956b, DEFAULT_ADDRESS};
//!
//! let mut leds = Pca9956b::new(i2c, DEFAULT_ADDRESS);
//!
//! // Auto-increment mode, 20 mA ceiling on every channel
//! leds.initialize(20)?;
//!
//! leds.set_channel(ChannelCommand::new(0, 50))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and trace logging of every transaction.

#![cfg_attr(not(test), no_std)]

pub use command::{ChannelCommand, ChannelCurrent, Frame};
pub use current::current_to_gain;
pub use error::{BusFailure, LedDriverError, TransactionPhase};
pub use led_driver::Pca9956b;
pub use led_driver_async::Pca9956bAsync;
pub use registers::{
    gain_register, pwm_register, AutoIncrement, Channel, InvalidChannel, RegisterAddress,
    CHANNEL_COUNT, DEFAULT_ADDRESS, DEFAULT_CURRENT_MA, MAX_CURRENT_MA, MAX_GAIN,
};

pub mod command;
pub mod current;
mod driver;
mod error;
mod led_driver;
mod led_driver_async;
pub mod registers;
