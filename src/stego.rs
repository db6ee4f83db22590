//! # LSB Steganography Transform
//!
//! Hides an ASCII message in the least significant bits of a [`PixelGrid`]
//! and reads it back.
//!
//! ## Algorithm
//!
//! ### Encoding Process
//! 1. Validate the message (ASCII only, no NUL) and turn it into a bit-stream:
//!    one 8-bit group per character, MSB first, concatenated in order
//! 2. Walk the grid in slot order (row → pixel → channel)
//! 3. Slot `i` gets bit `i` of the stream as its LSB while the stream lasts;
//!    every later slot gets LSB 0
//! 4. Only bit 0 of each channel changes
//!
//! The zero-filled tail doubles as the terminator: the first 8 slots after the
//! message read back as `00000000`. If the message fills the grid (or comes
//! within 8 slots of filling it) there is no room for that group, and if it is
//! longer than the grid the remainder is dropped. Neither case is an error.
//!
//! ### Decoding Process
//! 1. Walk the grid in the same slot order, collecting LSBs
//! 2. Every 8 bits: stop on `00000000`, otherwise append the character
//! 3. If the grid runs out first, return whatever was collected
//!
//! ### Capacity
//! A grid holds `width * height * channels` bits, so a 800x600 RGB image can
//! carry just under 180 000 characters.

use log::{debug, info, warn};

use crate::bits::{bits_to_char, char_to_bits, get_bit, set_bit, BYTE_LENGTH, ZERO_BYTE};
use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;

/// Result of [`encode_with_report`].
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The new grid carrying the message.
    pub grid: PixelGrid,
    /// Length of the full bit-stream of the message.
    pub message_bits: usize,
    /// Number of message bits actually written.
    pub embedded_bits: usize,
    /// Number of channel slots in the grid.
    pub capacity: usize,
    /// Whether a complete zero group follows the message in the grid.
    pub terminated: bool,
}

impl Encoded {
    pub fn truncated(&self) -> bool {
        self.embedded_bits < self.message_bits
    }
}

/// Result of [`decode_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub message: String,
    /// `true` if decoding stopped on a terminator group, `false` if the grid
    /// ran out first.
    pub terminated: bool,
}

/// Check that every character of `message` can be framed safely.
///
/// # Errors
/// - [`StegoError::NulCharacter`] for `'\0'`, which collides with the terminator
/// - [`StegoError::InvalidCharacter`] for anything outside ASCII
pub fn validate_message(message: &str) -> Result<()> {
    for (position, ch) in message.chars().enumerate() {
        if ch == '\0' {
            return Err(StegoError::NulCharacter { position });
        }
        if !ch.is_ascii() {
            return Err(StegoError::InvalidCharacter { ch, position });
        }
    }
    Ok(())
}

/// Convert an ASCII message into its bit-stream.
///
/// # Arguments
/// - `message`: ASCII text without NUL characters
///
/// # Returns
/// - `Ok(String)`: 8 binary digits per character, MSB first, in message order
///
/// # Errors
/// - Anything [`validate_message`] rejects
///
/// # Example
/// ```
/// use steganographer::stego::message_to_bits;
/// assert_eq!(message_to_bits("Hi").unwrap(), "0100100001101001");
/// ```
pub fn message_to_bits(message: &str) -> Result<String> {
    validate_message(message)?;

    let mut output = String::with_capacity(message.len() * BYTE_LENGTH);
    for ch in message.chars() {
        output.push_str(&char_to_bits(ch)?);
    }
    Ok(output)
}

/// Convert a bit-stream back into a message.
///
/// Stops at the first all-zero group. A trailing group shorter than 8 bits
/// is ignored.
///
/// # Errors
/// - [`StegoError::MalformedBitGroup`] if a group holds anything but `0`/`1`
pub fn bits_to_message(message_bits: &str) -> Result<String> {
    if !message_bits.is_ascii() {
        return Err(StegoError::MalformedBitGroup(message_bits.to_string()));
    }

    let mut output = String::with_capacity(message_bits.len() / BYTE_LENGTH);
    let mut index = 0;
    while index + BYTE_LENGTH <= message_bits.len() {
        let group = &message_bits[index..index + BYTE_LENGTH];
        if group == ZERO_BYTE {
            break;
        }
        output.push(bits_to_char(group)?);
        index += BYTE_LENGTH;
    }
    Ok(output)
}

/// Check that `message` survives conversion to bits and back unchanged.
pub fn round_trip(message: &str) -> Result<bool> {
    Ok(bits_to_message(&message_to_bits(message)?)? == message)
}

/// Hide `message` in a copy of `grid`.
///
/// `grid` is never modified. See the module documentation for the
/// embedding scheme.
///
/// # Arguments
/// - `grid`: Cover pixels
/// - `message`: ASCII text to hide; anything past the grid capacity is dropped
///
/// # Returns
/// - `Ok(PixelGrid)`: A new grid of the same shape, differing only in LSBs
///
/// # Errors
/// - [`StegoError::NulCharacter`] / [`StegoError::InvalidCharacter`] if the
///   message cannot be framed
pub fn encode(grid: &PixelGrid, message: &str) -> Result<PixelGrid> {
    Ok(encode_with_report(grid, message)?.grid)
}

/// Like [`encode`], but also reports how much of the message was written.
pub fn encode_with_report(grid: &PixelGrid, message: &str) -> Result<Encoded> {
    let stream = message_to_bits(message)?;
    let stream = stream.as_bytes();
    let capacity = grid.capacity();

    let encoded = grid.map_slots(|index, value| {
        let bit = match stream.get(index) {
            Some(b'1') => 1,
            _ => 0,
        };
        // Clearing or setting bit 0 of a u8 keeps it within u8.
        Ok(set_bit(u32::from(value), bit, 0)? as u8)
    })?;

    let report = Encoded {
        grid: encoded,
        message_bits: stream.len(),
        embedded_bits: stream.len().min(capacity),
        capacity,
        terminated: stream.len() + BYTE_LENGTH <= capacity,
    };

    if report.truncated() {
        warn!(
            "Message needs {} bits but the image only holds {}; the remainder was dropped",
            report.message_bits, capacity
        );
    } else if !report.terminated {
        warn!(
            "Message fills the image with no room for an end marker ({} of {} bits used)",
            report.message_bits, capacity
        );
    }
    info!(
        "Embedded {} of {} message bits into {}x{}x{} grid",
        report.embedded_bits,
        report.message_bits,
        grid.width(),
        grid.height(),
        grid.channels()
    );

    Ok(report)
}

/// Extract the hidden message from `grid`.
///
/// Never fails for lack of a terminator: a grid with no end marker yields
/// whatever characters were read before the grid ran out.
///
/// # Returns
/// - `Ok(String)`: The characters read before the terminator, possibly empty
pub fn decode(grid: &PixelGrid) -> Result<String> {
    Ok(decode_with_report(grid)?.message)
}

/// Like [`decode`], but also says whether a terminator was found.
pub fn decode_with_report(grid: &PixelGrid) -> Result<Decoded> {
    let mut message = String::new();
    let mut chunk = String::with_capacity(BYTE_LENGTH);

    for (_, value) in grid.slots() {
        let bit = get_bit(u32::from(value), 0)?;
        chunk.push(if bit == 1 { '1' } else { '0' });

        if chunk.len() == BYTE_LENGTH {
            if chunk == ZERO_BYTE {
                debug!(
                    "Terminator found after {} characters",
                    message.chars().count()
                );
                return Ok(Decoded {
                    message,
                    terminated: true,
                });
            }
            message.push(bits_to_char(&chunk)?);
            chunk.clear();
        }
    }

    debug!(
        "Reached end of grid without a terminator; returning {} characters",
        message.chars().count()
    );
    Ok(Decoded {
        message,
        terminated: false,
    })
}
