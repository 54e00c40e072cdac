//! Output current to gain code conversion.
//!
//! Each IREFx register feeds an 8-bit linear DAC that sets the peak output
//! current of its channel, from 0 up to [`MAX_CURRENT_MA`] at code
//! [`MAX_GAIN`].

use crate::registers::{MAX_CURRENT_MA, MAX_GAIN};

/// Convert a peak current request in mA to an IREFx gain code.
///
/// Requests at or above [`MAX_CURRENT_MA`] saturate to [`MAX_GAIN`]; below
/// that the result is `floor(current_ma * 255 / 57)`.
pub const fn current_to_gain(current_ma: u8) -> u8 {
    if current_ma >= MAX_CURRENT_MA {
        return MAX_GAIN;
    }
    // Widen before multiplying: 56 * 255 does not fit in a u8.
    ((current_ma as u16 * MAX_GAIN as u16) / MAX_CURRENT_MA as u16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_below_saturation() {
        for current in 0..MAX_CURRENT_MA {
            let expected = (u32::from(current) * 255 / 57) as u8;
            assert_eq!(current_to_gain(current), expected, "current {} mA", current);
        }
    }

    #[test]
    fn saturates_at_and_above_max() {
        for current in MAX_CURRENT_MA..=u8::MAX {
            assert_eq!(current_to_gain(current), 255);
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(current_to_gain(0), 0);
        assert_eq!(current_to_gain(5), 22);
        assert_eq!(current_to_gain(20), 89);
        assert_eq!(current_to_gain(56), 250);
    }

    #[test]
    fn never_truncates_to_zero_for_nonzero_requests() {
        for current in 1..MAX_CURRENT_MA {
            assert!(current_to_gain(current) > 0);
        }
    }

    #[test]
    fn monotonic() {
        let mut previous = 0;
        for current in 0..=u8::MAX {
            let gain = current_to_gain(current);
            assert!(gain >= previous);
            previous = gain;
        }
    }
}
