//! Command encoding.
//!
//! Turns logical requests into [`Frame`]s: the exact bytes of one I2C write
//! transaction. Both the blocking and the async controller send these
//! frames unchanged, so the wire format is decided here and only here.
//!
//! Two transaction shapes exist:
//! - **Single register**: `[register, value]`, no auto-increment flag.
//! - **Block**: `[register | AIF, v0, v1, ...]`, one control byte followed
//!   by values for consecutive registers.

use heapless::Vec;

use crate::current::current_to_gain;
use crate::registers::{
    gain_register, pwm_register, AutoIncrement, Channel, InvalidChannel, RegisterAddress,
    CHANNEL_COUNT, MODE2_DEFAULT,
};

/// Largest frame: one control byte plus a full 24-register block.
pub const MAX_FRAME_LEN: usize = CHANNEL_COUNT + 1;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Desired brightness of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelCommand {
    /// Channel index, checked when the command is encoded.
    pub channel: u8,
    /// PWM duty, 0 = off, 255 = full.
    pub level: u8,
}

impl ChannelCommand {
    pub const fn new(channel: u8, level: u8) -> Self {
        Self { channel, level }
    }
}

impl From<(u8, u8)> for ChannelCommand {
    fn from((channel, level): (u8, u8)) -> Self {
        Self { channel, level }
    }
}

/// Desired peak output current of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelCurrent {
    /// Channel index, checked when the command is encoded.
    pub channel: u8,
    /// Peak current in mA; saturates at 57 mA.
    pub current_ma: u8,
}

impl ChannelCurrent {
    pub const fn new(channel: u8, current_ma: u8) -> Self {
        Self {
            channel,
            current_ma,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// The bytes of one write transaction, control byte first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// `[register, value]`.
    pub(crate) fn single(register: RegisterAddress, value: u8) -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[register.to_byte(), value]).ok();
        Self { bytes }
    }

    /// `[start | AIF, payload...]`.
    ///
    /// Payload beyond [`CHANNEL_COUNT`] bytes does not fit a frame and is
    /// dropped; every caller passes at most one full register block.
    pub(crate) fn block(start: RegisterAddress, payload: &[u8]) -> Self {
        debug_assert!(payload.len() <= CHANNEL_COUNT);
        let len = payload.len().min(CHANNEL_COUNT);

        let mut bytes = Vec::new();
        bytes.push(start.with_auto_increment().to_byte()).ok();
        bytes.extend_from_slice(&payload[..len]).ok();
        Self { bytes }
    }

    /// The control byte this transaction starts with.
    pub fn register(&self) -> RegisterAddress {
        // Both constructors push the control byte first.
        RegisterAddress::from_byte(self.bytes[0])
    }

    /// Payload bytes following the control byte.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Everything that goes on the wire after the device address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:#04x}", self.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// MODE1 + MODE2 in one block: enable auto-increment across MODE1..=IREF23
/// and leave the oscillator running.
pub fn mode_frame() -> Frame {
    Frame::block(
        RegisterAddress::MODE1,
        &[AutoIncrement::ControlAndGain.bits(), MODE2_DEFAULT],
    )
}

/// Program every IREF register with the same gain in one block.
pub fn global_current_frame(current_ma: u8) -> Frame {
    let gain = current_to_gain(current_ma);
    Frame::block(RegisterAddress::IREF0, &[gain; CHANNEL_COUNT])
}

/// The initialization sequence: mode setup, then uniform current for all
/// channels.
pub fn initialize_frames(current_ma: u8) -> [Frame; 2] {
    [mode_frame(), global_current_frame(current_ma)]
}

/// Single-register PWM write for one channel.
pub fn channel_frame(command: ChannelCommand) -> Result<Frame, InvalidChannel> {
    let channel = Channel::new(command.channel)?;
    Ok(Frame::single(pwm_register(channel), command.level))
}

/// Single-register IREF write for one channel.
pub fn channel_current_frame(command: ChannelCurrent) -> Result<Frame, InvalidChannel> {
    let channel = Channel::new(command.channel)?;
    Ok(Frame::single(
        gain_register(channel),
        current_to_gain(command.current_ma),
    ))
}

/// All 24 PWM registers in channel order, one block.
pub fn levels_frame(levels: &[u8; CHANNEL_COUNT]) -> Frame {
    Frame::block(RegisterAddress::PWM0, levels)
}

/// Same PWM level on every channel, one block.
pub fn fill_levels_frame(level: u8) -> Frame {
    levels_frame(&[level; CHANNEL_COUNT])
}

/// Group duty cycle.
pub fn group_dimming_frame(duty: u8) -> Frame {
    Frame::single(RegisterAddress::GRPPWM, duty)
}

/// Check every command of a batch before any of it is sent.
pub(crate) fn validate_batch(commands: &[ChannelCommand]) -> Result<(), InvalidChannel> {
    commands
        .iter()
        .try_for_each(|command| Channel::new(command.channel).map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_zero_frame() {
        let frame = channel_frame(ChannelCommand::new(0, 50)).unwrap();
        assert_eq!(frame.as_bytes(), &[0x0A, 50]);
        assert!(!frame.register().is_auto_increment());
    }

    #[test]
    fn last_channel_frame() {
        let frame = channel_frame(ChannelCommand::new(23, 255)).unwrap();
        assert_eq!(frame.as_bytes(), &[0x21, 255]);
    }

    #[test]
    fn channel_frame_rejects_out_of_range() {
        assert_eq!(
            channel_frame(ChannelCommand::new(24, 10)),
            Err(InvalidChannel(24))
        );
    }

    #[test]
    fn mode_frame_bytes() {
        assert_eq!(mode_frame().as_bytes(), &[0x80, 0xC0, 0x00]);
    }

    #[test]
    fn initialize_frames_for_twenty_milliamps() {
        let [mode, gain] = initialize_frames(20);
        assert_eq!(mode, mode_frame());

        assert_eq!(gain.register().to_byte(), 0xA2);
        assert_eq!(gain.payload().len(), CHANNEL_COUNT);
        assert!(gain.payload().iter().all(|&g| g == 89));
    }

    #[test]
    fn global_current_saturates() {
        let frame = global_current_frame(200);
        assert!(frame.payload().iter().all(|&g| g == 255));
    }

    #[test]
    fn channel_current_frame_uses_gain_register() {
        let frame = channel_current_frame(ChannelCurrent::new(3, 20)).unwrap();
        assert_eq!(frame.as_bytes(), &[0x25, 89]);
        assert_eq!(
            channel_current_frame(ChannelCurrent::new(30, 20)),
            Err(InvalidChannel(30))
        );
    }

    #[test]
    fn levels_frame_keeps_channel_order() {
        let mut levels = [0u8; CHANNEL_COUNT];
        for (i, level) in levels.iter_mut().enumerate() {
            *level = i as u8 * 10;
        }
        let frame = levels_frame(&levels);
        assert_eq!(frame.as_bytes()[0], 0x8A);
        assert_eq!(frame.payload(), &levels);
        assert_eq!(frame.as_bytes().len(), MAX_FRAME_LEN);
    }

    #[test]
    fn fill_levels_frame_repeats_level() {
        let frame = fill_levels_frame(7);
        assert_eq!(frame.payload(), &[7; CHANNEL_COUNT]);
    }

    #[test]
    fn group_dimming_frame_bytes() {
        assert_eq!(group_dimming_frame(128).as_bytes(), &[0x08, 128]);
    }

    #[test]
    fn validate_batch_finds_bad_entry() {
        let commands = [
            ChannelCommand::new(0, 1),
            ChannelCommand::new(40, 1),
            ChannelCommand::new(50, 1),
        ];
        assert_eq!(validate_batch(&commands), Err(InvalidChannel(40)));
        assert_eq!(validate_batch(&commands[..1]), Ok(()));
        assert_eq!(validate_batch(&[]), Ok(()));
    }

    #[test]
    fn command_from_tuple() {
        assert_eq!(ChannelCommand::from((4, 200)), ChannelCommand::new(4, 200));
    }
}
