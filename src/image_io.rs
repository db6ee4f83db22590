//! # PNG Image I/O
//!
//! Moves pixel data between PNG files (or in-memory PNG bytes) and
//! [`PixelGrid`]. Only PNG is accepted: lossy containers would destroy the
//! low bits the message lives in.
//!
//! The channel arity of the grid picks the colour type the image is converted
//! to on load and saved as on write. When no arity is requested, the image's
//! own channel count is kept, so an RGBA cover keeps its alpha channel:
//!
//! | channels | colour type |
//! |----------|-------------|
//! | 1        | Luma8       |
//! | 2        | LumaA8      |
//! | 3        | Rgb8        |
//! | 4        | Rgba8       |

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat};
use log::debug;

use crate::error::{Result, StegoError};
use crate::grid::PixelGrid;

const PNG_EXTENSION: &str = "png";

/// Returns `true` if the path ends in `.png` (any case).
pub fn has_png_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(PNG_EXTENSION))
}

fn require_png(path: &Path) -> Result<()> {
    if has_png_extension(path) {
        Ok(())
    } else {
        Err(StegoError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Load a PNG file into a pixel grid.
///
/// # Arguments
/// - `path`: Path to a `.png` file
/// - `channels`: Channel values per pixel, or `None` to keep the image's own
///
/// # Returns
/// - `Ok(PixelGrid)`: The decoded pixels, 8 bits per channel
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] if the path is not a `.png` file
/// - [`StegoError::UnsupportedChannels`] if `channels` is not 1-4
/// - [`StegoError::Image`] if the file cannot be opened or decoded
pub fn read<P: AsRef<Path>>(path: P, channels: Option<usize>) -> Result<PixelGrid> {
    let path = path.as_ref();
    require_png(path)?;

    let img = image::open(path)?;
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    to_grid(&img, channels)
}

/// Save a grid as a PNG file.
///
/// # Arguments
/// - `grid`: Pixels to save; its channel count picks the colour type
/// - `path`: Destination, must end in `.png`
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] if the path is not a `.png` file
/// - [`StegoError::UnsupportedChannels`] if the grid has more than 4 channels
/// - [`StegoError::Image`] if encoding or writing fails
pub fn write<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    require_png(path)?;

    to_image(grid)?.save_with_format(path, ImageFormat::Png)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Decode PNG bytes into a pixel grid.
///
/// # Arguments
/// - `bytes`: Raw PNG file contents
/// - `channels`: Channel values per pixel, or `None` to keep the image's own
///
/// # Errors
/// - [`StegoError::UnsupportedFormat`] if the bytes are not a PNG image
/// - [`StegoError::UnsupportedChannels`] if `channels` is not 1-4
/// - [`StegoError::Image`] if the PNG data is corrupt
pub fn read_bytes(bytes: &[u8], channels: Option<usize>) -> Result<PixelGrid> {
    let unsupported = || StegoError::UnsupportedFormat("in-memory image".to_string());
    let format = image::guess_format(bytes).map_err(|_| unsupported())?;
    if format != ImageFormat::Png {
        return Err(unsupported());
    }
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    to_grid(&img, channels)
}

/// Encode a grid as PNG bytes.
///
/// # Errors
/// - [`StegoError::UnsupportedChannels`] if the grid has more than 4 channels
/// - [`StegoError::Image`] if PNG encoding fails
pub fn write_bytes(grid: &PixelGrid) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    to_image(grid)?.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)?;
    Ok(output_bytes)
}

fn to_grid(img: &DynamicImage, channels: Option<usize>) -> Result<PixelGrid> {
    let (width, height) = img.dimensions();
    let channels = channels.unwrap_or_else(|| usize::from(img.color().channel_count()));
    let data = match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        other => return Err(StegoError::UnsupportedChannels(other)),
    };
    PixelGrid::new(width as usize, height as usize, channels, data)
}

fn to_image(grid: &PixelGrid) -> Result<DynamicImage> {
    let width = dimension(grid.width())?;
    let height = dimension(grid.height())?;
    let data = grid.as_slice().to_vec();
    let mismatch = || StegoError::RaggedGrid("pixel data does not match image size".to_string());

    let img = match grid.channels() {
        1 => DynamicImage::ImageLuma8(ImageBuffer::from_raw(width, height, data).ok_or_else(mismatch)?),
        2 => DynamicImage::ImageLumaA8(ImageBuffer::from_raw(width, height, data).ok_or_else(mismatch)?),
        3 => DynamicImage::ImageRgb8(ImageBuffer::from_raw(width, height, data).ok_or_else(mismatch)?),
        4 => DynamicImage::ImageRgba8(ImageBuffer::from_raw(width, height, data).ok_or_else(mismatch)?),
        other => return Err(StegoError::UnsupportedChannels(other)),
    };
    Ok(img)
}

fn dimension(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| StegoError::RaggedGrid(format!("dimension {} too large for an image", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_extension() {
        assert!(has_png_extension("photo.png"));
        assert!(has_png_extension("dir/PHOTO.PNG"));
        assert!(!has_png_extension("photo.jpg"));
        assert!(!has_png_extension("png"));
    }

    #[test]
    fn test_read_rejects_non_png_path() {
        assert!(matches!(
            read("holiday.jpg", Some(3)),
            Err(StegoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bytes_round_trip_keeps_values() {
        let data: Vec<u8> = (0..4 * 3 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let grid = PixelGrid::new(4, 3, 4, data).unwrap();

        let bytes = write_bytes(&grid).unwrap();
        let back = read_bytes(&bytes, Some(4)).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_native_channel_count_kept() {
        let grid = PixelGrid::filled(3, 2, 2, 90).unwrap();
        let bytes = write_bytes(&grid).unwrap();
        assert_eq!(read_bytes(&bytes, None).unwrap().channels(), 2);
        assert_eq!(read_bytes(&bytes, Some(3)).unwrap().channels(), 3);
    }

    #[test]
    fn test_unrecognised_bytes_are_unsupported() {
        assert!(matches!(
            read_bytes(b"definitely not an image", None),
            Err(StegoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_channel_count() {
        let grid = PixelGrid::filled(2, 2, 5, 0).unwrap();
        assert!(matches!(
            write_bytes(&grid),
            Err(StegoError::UnsupportedChannels(5))
        ));
    }
}
