//! # Steganographer
//!
//! Hides ASCII text in the least significant bits of an image's channel
//! values and reads it back.
//!
//! ## Modules
//!
//! - [`bits`]: character ↔ 8-bit group conversion and single-bit get/set
//! - [`grid`]: immutable pixel grid with a fixed slot traversal order
//! - [`stego`]: the LSB encode/decode transform
//! - [`image_io`]: PNG file and byte adapters
//! - [`config`]: TOML configuration for the command-line tool
//! - [`naming`]: output filename derivation
//! - [`error`]: the crate error type

pub mod bits;
pub mod config;
pub mod error;
pub mod grid;
pub mod image_io;
pub mod naming;
pub mod stego;

pub use error::{Result, StegoError};
pub use grid::PixelGrid;
pub use stego::{decode, encode};
