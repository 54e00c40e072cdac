//! Demo configuration.

use pca9956b_driver::{DEFAULT_ADDRESS, DEFAULT_CURRENT_MA};

/// Settings for the test sequence.
///
/// [`DemoConfig::default()`] matches the Switch Science PCA9956BTW breakout
/// fitted with small SMD RGB LEDs.
pub struct DemoConfig {
    /// 7-bit I2C address of the PCA9956B. Default: 0x3F.
    pub address: u8,
    /// Per-channel current ceiling programmed at start-up, in mA. Default: 5.
    pub current_ma: u8,
    /// Delay between brightness steps of a fade, in ms. Default: 10.
    pub fade_step_ms: u64,
    /// Pause between sequences, in ms. Default: 1000.
    pub pause_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            current_ma: DEFAULT_CURRENT_MA,
            fade_step_ms: 10,
            pause_ms: 1000,
        }
    }
}
