//! PCA9956B register map.
//!
//! The chip exposes a flat, byte-addressed register space. The first byte of
//! every write transaction is a control byte:
//! - Bits 6:0: register address
//! - Bit 7: auto-increment flag (AIF)
//!
//! When AIF is set, each payload byte after the first lands in the next
//! register, so a contiguous block can be programmed in one transaction.
//! How far the address advances before rolling over is selected by the
//! [`AutoIncrement`] scope bits in MODE1.

use core::fmt;

// ---------------------------------------------------------------------------
// Device constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address (Switch Science PCA9956BTW breakout, all
/// address pins pulled high).
pub const DEFAULT_ADDRESS: u8 = 0x3F;

/// Number of LED outputs on the chip.
pub const CHANNEL_COUNT: usize = 24;

/// Peak output current reached at the maximum gain code, in mA.
pub const MAX_CURRENT_MA: u8 = 57;

/// Largest gain code accepted by the IREFx registers.
pub const MAX_GAIN: u8 = 255;

/// Current programmed by [`Pca9956b::initialize_default`](crate::Pca9956b::initialize_default).
///
/// 5 mA is safe for almost any small SMD LED.
pub const DEFAULT_CURRENT_MA: u8 = 5;

/// Auto-increment flag, bit 7 of the control byte.
pub const AUTO_INCREMENT_FLAG: u8 = 0b1000_0000;

/// Value written to MODE2 during initialization (no blinking, no error clear).
pub const MODE2_DEFAULT: u8 = 0x00;

const REGISTER_MASK: u8 = !AUTO_INCREMENT_FLAG;

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// One control byte: a 7-bit register address plus the auto-increment flag.
///
/// Values are only built from the constants below or from a validated
/// [`Channel`], so the register part always lies inside MODE1..=IREF23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterAddress(u8);

impl RegisterAddress {
    /// Mode register 1 (oscillator, auto-increment scope, sub-addresses).
    pub const MODE1: Self = Self(0x00);
    /// Mode register 2 (group control, error flags).
    pub const MODE2: Self = Self(0x01);
    /// First LED output state register; LEDOUT0..5 cover four channels each.
    pub const LEDOUT0: Self = Self(0x02);
    /// Group duty cycle.
    pub const GRPPWM: Self = Self(0x08);
    /// Group blink frequency.
    pub const GRPFREQ: Self = Self(0x09);
    /// Channel 0 brightness; PWM0..PWM23 are contiguous.
    pub const PWM0: Self = Self(0x0A);
    /// Channel 0 output current gain; IREF0..IREF23 are contiguous.
    pub const IREF0: Self = Self(0x22);

    /// Same register with the auto-increment flag set.
    ///
    /// Only bit 7 changes; the register bits are left untouched.
    pub const fn with_auto_increment(self) -> Self {
        Self(self.0 | AUTO_INCREMENT_FLAG)
    }

    /// Whether the auto-increment flag is set.
    pub const fn is_auto_increment(self) -> bool {
        self.0 & AUTO_INCREMENT_FLAG != 0
    }

    /// The 7-bit register address without the flag.
    pub const fn register(self) -> u8 {
        self.0 & REGISTER_MASK
    }

    /// The raw control byte as sent on the bus.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    pub(crate) const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    const fn offset(self, channel: Channel) -> Self {
        Self(self.0 + channel.0)
    }
}

impl fmt::Display for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RegisterAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:#04x}", self.0)
    }
}

/// Brightness (PWM duty) register of a channel: `PWM0 + channel`.
pub const fn pwm_register(channel: Channel) -> RegisterAddress {
    RegisterAddress::PWM0.offset(channel)
}

/// Output current gain register of a channel: `IREF0 + channel`.
pub const fn gain_register(channel: Channel) -> RegisterAddress {
    RegisterAddress::IREF0.offset(channel)
}

// ---------------------------------------------------------------------------
// MODE1 auto-increment scope
// ---------------------------------------------------------------------------

/// Auto-increment scope, written to MODE1 bits 7:5.
///
/// Determines which register window a block write walks through and where
/// the address rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AutoIncrement {
    /// No auto-increment.
    Disabled = 0b0000_0000,
    /// 0x00..=0x3E, rolls over to 0x00.
    AllRegisters = 0b1000_0000,
    /// PWM0..=PWM23 only, rolls over to PWM0.
    Brightness = 0b1010_0000,
    /// MODE1..=IREF23, rolls over to MODE1.
    ControlAndGain = 0b1100_0000,
    /// GRPPWM..=PWM23, rolls over to GRPPWM.
    GlobalAndBrightness = 0b1110_0000,
}

impl AutoIncrement {
    /// MODE1 bit pattern for this scope.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Channel index
// ---------------------------------------------------------------------------

/// A channel index checked to be below [`CHANNEL_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

/// Returned by [`Channel::new`] for an index outside `0..CHANNEL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChannel(pub u8);

impl Channel {
    /// Validate a raw channel index.
    pub const fn new(index: u8) -> Result<Self, InvalidChannel> {
        if (index as usize) < CHANNEL_COUNT {
            Ok(Self(index))
        } else {
            Err(InvalidChannel(index))
        }
    }

    /// The raw index.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Iterate over every channel in ascending order.
    pub fn all() -> impl Iterator<Item = Channel> {
        (0..CHANNEL_COUNT as u8).map(Channel)
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Channel::new(index)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwm_registers_follow_channel_index() {
        for channel in Channel::all() {
            assert_eq!(pwm_register(channel).to_byte(), 0x0A + channel.index());
        }
        assert_eq!(pwm_register(Channel::new(23).unwrap()).to_byte(), 0x21);
    }

    #[test]
    fn gain_registers_follow_channel_index() {
        for channel in Channel::all() {
            assert_eq!(gain_register(channel).to_byte(), 0x22 + channel.index());
        }
        assert_eq!(gain_register(Channel::new(23).unwrap()).to_byte(), 0x39);
    }

    #[test]
    fn pwm_and_gain_blocks_do_not_overlap() {
        let last_pwm = pwm_register(Channel::new(23).unwrap()).to_byte();
        let first_gain = gain_register(Channel::new(0).unwrap()).to_byte();
        assert!(last_pwm < first_gain);
    }

    #[test]
    fn derived_registers_never_carry_auto_increment() {
        for channel in Channel::all() {
            assert!(!pwm_register(channel).is_auto_increment());
            assert!(!gain_register(channel).is_auto_increment());
        }
    }

    #[test]
    fn auto_increment_sets_only_bit_seven() {
        for channel in Channel::all() {
            for addr in [pwm_register(channel), gain_register(channel)] {
                let flagged = addr.with_auto_increment();
                assert_eq!(flagged.to_byte(), addr.to_byte() | 0x80);
                assert_eq!(flagged.register(), addr.register());
                assert!(flagged.is_auto_increment());
            }
        }
        assert_eq!(RegisterAddress::MODE1.with_auto_increment().to_byte(), 0x80);
        assert_eq!(RegisterAddress::IREF0.with_auto_increment().to_byte(), 0xA2);
    }

    #[test]
    fn auto_increment_is_idempotent() {
        let once = RegisterAddress::PWM0.with_auto_increment();
        assert_eq!(once.with_auto_increment(), once);
    }

    #[test]
    fn channel_rejects_out_of_range() {
        assert_eq!(Channel::new(24), Err(InvalidChannel(24)));
        assert_eq!(Channel::try_from(255), Err(InvalidChannel(255)));
        assert_eq!(Channel::new(0).map(Channel::index), Ok(0));
        assert_eq!(Channel::new(23).map(Channel::index), Ok(23));
    }

    #[test]
    fn all_channels_count() {
        assert_eq!(Channel::all().count(), CHANNEL_COUNT);
    }

    #[test]
    fn mode1_scope_patterns() {
        assert_eq!(AutoIncrement::Disabled.bits(), 0x00);
        assert_eq!(AutoIncrement::AllRegisters.bits(), 0x80);
        assert_eq!(AutoIncrement::Brightness.bits(), 0xA0);
        assert_eq!(AutoIncrement::ControlAndGain.bits(), 0xC0);
        assert_eq!(AutoIncrement::GlobalAndBrightness.bits(), 0xE0);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(RegisterAddress::IREF0.to_string(), "0x22");
        assert_eq!(RegisterAddress::PWM0.with_auto_increment().to_string(), "0x8A");
    }
}
