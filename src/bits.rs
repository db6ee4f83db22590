//! # Bit Codec
//!
//! Primitive conversions between characters, 8-bit groups and single bits.
//!
//! Bit groups are written as strings of `'0'`/`'1'`, most significant bit
//! first, always exactly [`BYTE_LENGTH`] digits long. This fixed width is
//! what lets the transform frame a message without a length field.

use crate::error::{Result, StegoError};

/// Number of bits used to encode one character.
pub const BYTE_LENGTH: usize = 8;

/// The reserved all-zero group that marks the end of a hidden message.
pub const ZERO_BYTE: &str = "00000000";

const WORD_BITS: u32 = u32::BITS;

/// Convert a character to its 8-bit binary representation, MSB first.
///
/// # Arguments
/// - `c`: Character to convert; messages restrict this to ASCII
///
/// # Returns
/// - `Ok(String)`: Exactly 8 digits of `'0'`/`'1'`, zero-padded
///
/// # Errors
/// - [`StegoError::CharacterTooWide`] if the code point does not fit in a byte
///
/// # Example
/// ```
/// use steganographer::bits::char_to_bits;
/// assert_eq!(char_to_bits('A').unwrap(), "01000001");
/// ```
pub fn char_to_bits(c: char) -> Result<String> {
    let code = u8::try_from(u32::from(c))
        .map_err(|_| StegoError::CharacterTooWide(c))?;
    Ok(format!("{:08b}", code))
}

/// Convert an 8-digit bit group back into the character with that code.
///
/// # Arguments
/// - `bits`: Bit group, most significant bit first
///
/// # Returns
/// - `Ok(char)`: The character whose code is the unsigned value of `bits`
///
/// # Errors
/// - [`StegoError::MalformedBitGroup`] if `bits` is not exactly 8 characters
///   of `'0'` or `'1'`
pub fn bits_to_char(bits: &str) -> Result<char> {
    let well_formed =
        bits.len() == BYTE_LENGTH && bits.bytes().all(|b| b == b'0' || b == b'1');
    if !well_formed {
        return Err(StegoError::MalformedBitGroup(bits.to_string()));
    }

    let code = u8::from_str_radix(bits, 2)
        .map_err(|_| StegoError::MalformedBitGroup(bits.to_string()))?;
    Ok(char::from(code))
}

/// Return the bit of `n` at position `pos` (0 = least significant).
///
/// # Errors
/// - [`StegoError::BitPositionOutOfRange`] if `pos` is 32 or more
pub fn get_bit(n: u32, pos: u32) -> Result<u8> {
    check_position(pos)?;
    Ok(((n >> pos) & 1) as u8)
}

/// Return `n` with the bit at `pos` replaced by `bit`; every other bit is kept.
///
/// # Arguments
/// - `n`: Original value, left untouched
/// - `bit`: New bit value, 0 or 1
/// - `pos`: Bit position, 0 = least significant
///
/// # Errors
/// - [`StegoError::InvalidBit`] if `bit` is not 0 or 1
/// - [`StegoError::BitPositionOutOfRange`] if `pos` is 32 or more
pub fn set_bit(n: u32, bit: u32, pos: u32) -> Result<u32> {
    check_position(pos)?;
    if bit > 1 {
        return Err(StegoError::InvalidBit(bit));
    }
    Ok((n & !(1 << pos)) | (bit << pos))
}

fn check_position(pos: u32) -> Result<()> {
    if pos >= WORD_BITS {
        return Err(StegoError::BitPositionOutOfRange(pos));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_bits() {
        assert_eq!(char_to_bits('A').unwrap(), "01000001");
        assert_eq!(char_to_bits('H').unwrap(), "01001000");
        assert_eq!(char_to_bits('i').unwrap(), "01101001");
        assert_eq!(char_to_bits('\u{1}').unwrap(), "00000001");
        assert_eq!(char_to_bits('\u{7f}').unwrap(), "01111111");
    }

    #[test]
    fn test_char_to_bits_rejects_wide_chars() {
        assert!(matches!(
            char_to_bits('€'),
            Err(StegoError::CharacterTooWide('€'))
        ));
    }

    #[test]
    fn test_bits_to_char() {
        assert_eq!(bits_to_char("01000001").unwrap(), 'A');
        assert_eq!(bits_to_char("01111111").unwrap(), '\u{7f}');
    }

    #[test]
    fn test_bits_to_char_malformed() {
        for bad in ["", "0100000", "010000011", "0100000x", "01 00001", "0100000é"] {
            assert!(
                matches!(bits_to_char(bad), Err(StegoError::MalformedBitGroup(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_get_bit() {
        assert_eq!(get_bit(0b1010, 0).unwrap(), 0);
        assert_eq!(get_bit(0b1010, 1).unwrap(), 1);
        assert_eq!(get_bit(255, 7).unwrap(), 1);
        assert_eq!(get_bit(255, 8).unwrap(), 0);
        assert!(matches!(
            get_bit(1, 32),
            Err(StegoError::BitPositionOutOfRange(32))
        ));
    }

    #[test]
    fn test_set_bit() {
        assert_eq!(set_bit(0b1010, 1, 0).unwrap(), 0b1011);
        assert_eq!(set_bit(0b1011, 0, 0).unwrap(), 0b1010);
        assert_eq!(set_bit(0b1010, 1, 1).unwrap(), 0b1010);
        assert_eq!(set_bit(254, 1, 0).unwrap(), 255);
        assert_eq!(set_bit(255, 0, 7).unwrap(), 127);
        assert!(matches!(set_bit(0, 2, 0), Err(StegoError::InvalidBit(2))));
    }
}
