//! PCA9956B test sequence
//!
//! Exercises the pca9956b-driver crate on the Raspberry Pi Pico 2 with a
//! PCA9956BTW breakout driving eight RGB LEDs. Initializes the chip, then
//! loops through fades and fixed patterns, logging each step via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |
//! | OE        | GND        | Outputs always enabled       |

#![no_std]
#![no_main]

mod config;
mod sequences;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pca9956b_driver::Pca9956bAsync;

use crate::config::DemoConfig;
use crate::sequences::Colour;

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let config = DemoConfig::default();

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c_config,
    );

    let mut leds = Pca9956bAsync::new(i2c, config.address);

    // Every write is absolute, so a failed init is simply repeated.
    while let Err(e) = leds.initialize(config.current_ma).await {
        error!("PCA9956B init failed: {}", e);
        Timer::after(Duration::from_millis(config.pause_ms)).await;
    }
    info!("PCA9956B ready, {} mA per channel", config.current_ma);

    if let Err(e) = sequences::all_off(&mut leds).await {
        error!("All off failed: {}", e);
    }
    Timer::after(Duration::from_millis(config.pause_ms)).await;

    if let Err(e) = sequences::corners(&mut leds).await {
        error!("Corner check failed: {}", e);
    }
    Timer::after(Duration::from_millis(config.pause_ms)).await;

    let step = Duration::from_millis(config.fade_step_ms);
    let pause = Duration::from_millis(config.pause_ms);

    loop {
        for colour in [Colour::Red, Colour::Green, Colour::Blue] {
            info!("Fade in {}", colour);
            if let Err(e) = sequences::fade_in(&mut leds, colour, step).await {
                error!("Fade failed: {}", e);
            }
            Timer::after(pause).await;
        }

        info!("Pattern");
        if let Err(e) = sequences::part_rgb(&mut leds).await {
            error!("Pattern failed: {}", e);
        }
        Timer::after(pause).await;

        info!("All on");
        if let Err(e) = sequences::all_on(&mut leds).await {
            error!("All on failed: {}", e);
        }
        Timer::after(pause).await;

        if let Err(e) = sequences::all_off(&mut leds).await {
            error!("All off failed: {}", e);
        }
        Timer::after(pause).await;
    }
}
