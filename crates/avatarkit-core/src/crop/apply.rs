//! Pixel extraction for a computed crop region.
//!
//! This is the only place a [`CropRegion`] meets real pixel bounds, so this
//! is where it is clamped.
//!
//! # Behavior
//!
//! - Edges beyond the image are clamped to it
//! - Minimum output dimension is 1x1 pixels
//! - A region covering the whole image returns a copy of the original

use crate::decode::DecodedImage;

use super::CropRegion;

/// Extract the pixels of `region` from `image`.
///
/// # Example
///
/// ```
/// use avatarkit_core::crop::{apply_crop_region, CropRegion};
/// use avatarkit_core::decode::DecodedImage;
///
/// let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let cropped = apply_crop_region(&image, &CropRegion::new(25, 25, 75, 75));
/// assert_eq!(cropped.width, 50);
/// assert_eq!(cropped.height, 50);
/// ```
pub fn apply_crop_region(image: &DecodedImage, region: &CropRegion) -> DecodedImage {
    let img_w = i64::from(image.width);
    let img_h = i64::from(image.height);

    if image.is_empty() {
        return image.clone();
    }

    // Fast path: region covers the whole image
    if region.x0 <= 0 && region.y0 <= 0 && region.x1 >= img_w && region.y1 >= img_h {
        return image.clone();
    }

    // Clamp to image bounds
    let px_left = region.x0.clamp(0, (img_w - 1).max(0)) as u32;
    let px_top = region.y0.clamp(0, (img_h - 1).max(0)) as u32;
    let px_right = region.x1.clamp(0, img_w) as u32;
    let px_bottom = region.y1.clamp(0, img_h) as u32;

    // Ensure minimum dimensions
    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut output = vec![0u8; row_len * out_height as usize];

    // Copy pixel data row by row
    for (y, dst_row) in output.chunks_exact_mut(row_len).enumerate() {
        let src_start = (px_top as usize + y) * src_stride + px_left as usize * 3;
        dst_row.copy_from_slice(&image.pixels[src_start..src_start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
