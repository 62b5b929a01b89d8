//! Decoding of picked images into RGB pixels.
//!
//! Picked photos are JPEG or PNG. Camera JPEGs frequently store the sensor
//! orientation in EXIF; the crop coordinates are computed against the image
//! as displayed, so decoding applies that orientation before anything else.

mod orientation;

use std::io::Cursor;

use image::ImageReader;
use thiserror::Error;

use crate::crop::ImageDimensions;

pub use orientation::{read_orientation, Orientation};

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a recognised image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 3) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Decode JPEG or PNG bytes, applying EXIF orientation.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = read_orientation(bytes);
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = orientation.apply(img);
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded picked image"
    );
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Read the displayed dimensions of an encoded image without decoding pixels.
///
/// Pickers that only hand over bytes still need `width`/`height` to build a
/// [`SourceImage`](crate::source::SourceImage).
pub fn read_dimensions(bytes: &[u8]) -> Result<ImageDimensions, DecodeError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let dimensions = if read_orientation(bytes).swaps_dimensions() {
        ImageDimensions::new(height, width)
    } else {
        ImageDimensions::new(width, height)
    };
    Ok(dimensions)
}
