//! # Error Types
//!
//! Every fallible operation in the library returns [`StegoError`].
//!
//! Running out of grid capacity while encoding and reaching the end of the
//! grid without a terminator while decoding are *not* errors. Both are normal
//! operating modes and are reported through the `Encoded`/`Decoded` reports
//! instead.

use thiserror::Error;

/// Errors raised by the bit codec, the pixel grid, the transform and the
/// image adapter.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The character cannot be represented as a single 8-bit group.
    #[error("Invalid character {ch:?} at position {position}: only ASCII (0-127) is supported")]
    InvalidCharacter { ch: char, position: usize },

    /// A single character whose code point is wider than 8 bits.
    #[error("Character {0:?} does not fit in an 8-bit group")]
    CharacterTooWide(char),

    /// NUL encodes to the terminator and would end decoding early.
    #[error("Message contains a NUL character at position {position}")]
    NulCharacter { position: usize },

    /// A bit group handed to the codec is not exactly 8 binary digits.
    #[error("Malformed bit group {0:?}: expected exactly 8 binary digits")]
    MalformedBitGroup(String),

    #[error("Invalid bit value {0}: expected 0 or 1")]
    InvalidBit(u32),

    #[error("Bit position {0} is out of range for a 32-bit value")]
    BitPositionOutOfRange(u32),

    /// Rows of a grid have different lengths, or pixels have different arity.
    #[error("Ragged pixel grid: {0}")]
    RaggedGrid(String),

    #[error("Pixels must carry at least one channel")]
    EmptyPixel,

    #[error("Unsupported image format for {0}: only .png files are supported")]
    UnsupportedFormat(String),

    #[error("Unsupported channel count {0}: expected 1, 2, 3 or 4")]
    UnsupportedChannels(usize),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StegoError>;
