//! Turning a crop region into the final square avatar.
//!
//! The pipeline is decode → crop (clamped) → resize → JPEG encode. It is
//! what the upload side does with the coordinates a save forwards, and what
//! a client uses to preview the result.

use image::imageops::{self, FilterType};

use crate::crop::{apply_crop_region, CropRegion};
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::encode_jpeg;
use crate::error::{AvatarError, AvatarResult};

/// Edge length of uploaded avatars.
pub const DEFAULT_OUTPUT_SIZE: u32 = 360;

/// Crop `image` to `region` and scale the result to `output_size` square.
///
/// Non-square regions (clamped at an image edge) are stretched to the square.
pub fn render_region(
    image: &DecodedImage,
    region: &CropRegion,
    output_size: u32,
) -> AvatarResult<DecodedImage> {
    if output_size == 0 {
        return Err(AvatarError::InvalidConfig(
            "output size must be non-zero".to_string(),
        ));
    }

    if region.exceeds(image.dimensions()) {
        tracing::debug!(
            ?region,
            width = image.width,
            height = image.height,
            "clamping crop region"
        );
    }

    let cropped = apply_crop_region(image, region);
    if cropped.width == output_size && cropped.height == output_size {
        return Ok(cropped);
    }

    let rgb = cropped
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;
    let resized = imageops::resize(&rgb, output_size, output_size, FilterType::Lanczos3);
    Ok(DecodedImage::from_rgb_image(resized))
}

/// Decode `bytes`, crop to `region` and encode a `output_size` square JPEG.
pub fn render_avatar(
    bytes: &[u8],
    region: &CropRegion,
    output_size: u32,
    quality: u8,
) -> AvatarResult<Vec<u8>> {
    let decoded = decode_image(bytes)?;
    let avatar = render_region(&decoded, region, output_size)?;
    let jpeg = encode_jpeg(&avatar.pixels, avatar.width, avatar.height, quality)?;

    tracing::debug!(
        output_size,
        bytes = jpeg.len(),
        ?region,
        "rendered avatar"
    );
    Ok(jpeg)
}
