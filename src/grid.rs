//! # Pixel Grid
//!
//! An immutable, rectangular grid of pixels. Each pixel is a fixed-arity tuple
//! of `u8` channel intensities (3 for RGB, 4 for RGBA, ...). The arity is a
//! property of the grid, not a constant of the codec.
//!
//! ## Slot Order
//!
//! Every channel value in the grid is a *slot*. Slots are numbered by
//! [`PixelGrid::slot_index`]: row-major, then pixel, then channel. Both the
//! encoder and the decoder walk the grid through [`PixelGrid::slots`], so
//! they can never disagree about which bit lives where.

use crate::bits::BYTE_LENGTH;
use crate::error::{Result, StegoError};

/// A rectangular grid of fixed-arity pixels, stored flat in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from raw channel values laid out in slot order.
    ///
    /// # Arguments
    /// - `width`, `height`: Pixels per row and number of rows
    /// - `channels`: Channel values per pixel
    /// - `data`: Channel values, row-major, then pixel, then channel
    ///
    /// # Errors
    /// - [`StegoError::EmptyPixel`] if `channels` is zero
    /// - [`StegoError::RaggedGrid`] if `data` does not hold exactly
    ///   `width * height * channels` values, or that product overflows
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(StegoError::EmptyPixel);
        }
        let expected = slot_count(width, height, channels)?;
        if data.len() != expected {
            return Err(StegoError::RaggedGrid(format!(
                "{}x{}x{} grid needs {} values, got {}",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build a grid where every channel of every pixel holds `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        let len = slot_count(width, height, channels)?;
        Self::new(width, height, channels, vec![value; len])
    }

    /// Build a grid from nested rows of pixels.
    ///
    /// All rows must have the same number of pixels and every pixel must have
    /// exactly `channels` values.
    pub fn from_rows(channels: usize, rows: &[Vec<Vec<u8>>]) -> Result<Self> {
        if channels == 0 {
            return Err(StegoError::EmptyPixel);
        }
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(slot_count(width, rows.len(), channels)?);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(StegoError::RaggedGrid(format!(
                    "row {} has {} pixels, expected {}",
                    r,
                    row.len(),
                    width
                )));
            }
            for (c, pixel) in row.iter().enumerate() {
                if pixel.len() != channels {
                    return Err(StegoError::RaggedGrid(format!(
                        "pixel ({}, {}) has {} channels, expected {}",
                        r,
                        c,
                        pixel.len(),
                        channels
                    )));
                }
                data.extend_from_slice(pixel);
            }
        }

        Self::new(width, rows.len(), channels, data)
    }

    /// Copy the grid out as nested rows of pixels.
    pub fn to_rows(&self) -> Vec<Vec<Vec<u8>>> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.pixel(row, col).unwrap_or_default().to_vec())
                    .collect()
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channel values per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of channel slots, i.e. the number of bits the grid can hold.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Longest message (in characters) that fits while still leaving room
    /// for a full terminator group after it.
    pub fn max_message_len(&self) -> usize {
        (self.capacity() / BYTE_LENGTH).saturating_sub(1)
    }

    /// Linear position of a channel slot in the shared traversal order.
    pub fn slot_index(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    /// The channel values of one pixel.
    pub fn pixel(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = self.slot_index(row, col, 0);
        Some(&self.data[start..start + self.channels])
    }

    /// Walk every slot in traversal order, yielding `(index, value)`.
    pub fn slots(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).flat_map(move |col| {
                (0..self.channels).map(move |channel| {
                    let index = self.slot_index(row, col, channel);
                    (index, self.data[index])
                })
            })
        })
    }

    /// Produce a new grid of the same shape, computing each slot from its
    /// index and current value. `self` is left untouched.
    pub fn map_slots<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, u8) -> Result<u8>,
    {
        let mut data = vec![0u8; self.data.len()];
        for (index, value) in self.slots() {
            data[index] = f(index, value)?;
        }
        Self::new(self.width, self.height, self.channels, data)
    }

    /// Raw channel values in slot order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

fn slot_count(width: usize, height: usize, channels: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            StegoError::RaggedGrid(format!(
                "{}x{}x{} grid is too large to address",
                width, height, channels
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelGrid {
        PixelGrid::from_rows(
            3,
            &[
                vec![vec![1, 2, 3], vec![4, 5, 6]],
                vec![vec![7, 8, 9], vec![10, 11, 12]],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let grid = sample();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.channels(), 3);
        assert_eq!(grid.capacity(), 12);
        assert_eq!(grid.max_message_len(), 0);
    }

    #[test]
    fn test_slot_order_is_row_pixel_channel() {
        let grid = sample();
        assert_eq!(grid.slot_index(0, 0, 0), 0);
        assert_eq!(grid.slot_index(0, 1, 2), 5);
        assert_eq!(grid.slot_index(1, 0, 0), 6);
        assert_eq!(grid.slot_index(1, 1, 2), 11);

        let values: Vec<u8> = grid.slots().map(|(_, v)| v).collect();
        assert_eq!(values, (1..=12).collect::<Vec<u8>>());
        let indices: Vec<usize> = grid.slots().map(|(i, _)| i).collect();
        assert_eq!(indices, (0..12).collect::<Vec<usize>>());
    }

    #[test]
    fn test_pixel_access() {
        let grid = sample();
        assert_eq!(grid.pixel(1, 0), Some(&[7u8, 8, 9][..]));
        assert_eq!(grid.pixel(2, 0), None);
        assert_eq!(grid.pixel(0, 2), None);
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![vec![1, 2, 3, 4]], vec![vec![5, 6, 7, 8]]];
        let grid = PixelGrid::from_rows(4, &rows).unwrap();
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![vec![1, 2, 3], vec![4, 5, 6]], vec![vec![7, 8, 9]]];
        assert!(matches!(
            PixelGrid::from_rows(3, &rows),
            Err(StegoError::RaggedGrid(_))
        ));
    }

    #[test]
    fn test_mixed_arity_rejected() {
        let rows = vec![vec![vec![1, 2, 3], vec![4, 5]]];
        assert!(matches!(
            PixelGrid::from_rows(3, &rows),
            Err(StegoError::RaggedGrid(_))
        ));
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert!(matches!(
            PixelGrid::filled(2, 2, 0, 0),
            Err(StegoError::EmptyPixel)
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            PixelGrid::new(usize::MAX, 2, 1, vec![]),
            Err(StegoError::RaggedGrid(_))
        ));
        assert!(matches!(
            PixelGrid::filled(usize::MAX / 2, 3, 3, 0),
            Err(StegoError::RaggedGrid(_))
        ));
    }

    #[test]
    fn test_wrong_data_length_rejected() {
        assert!(PixelGrid::new(2, 2, 3, vec![0; 11]).is_err());
    }

    #[test]
    fn test_map_slots_leaves_source_alone() {
        let grid = sample();
        let doubled = grid.map_slots(|_, v| Ok(v * 2)).unwrap();
        assert_eq!(grid, sample());
        assert_eq!(doubled.pixel(0, 0), Some(&[2u8, 4, 6][..]));
    }
}
