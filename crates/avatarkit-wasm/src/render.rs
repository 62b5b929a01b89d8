//! Render pipeline bindings: decode, crop, encode.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const crop = editor.crop_coordinates();
//! const jpeg = render_avatar(bytes, crop, 360, 90);
//!
//! // Or crop decoded pixels and encode them yourself
//! const cropped = crop_image(decode_image(bytes), crop);
//! const upload = encode_jpeg(cropped.pixels(), cropped.width, cropped.height, 90);
//! ```

use avatarkit_core::crop::apply_crop_region;
use avatarkit_core::{decode, encode, render};
use wasm_bindgen::prelude::*;

use crate::editor::to_js_error;
use crate::types::{JsCropRegion, JsDecodedImage};

/// Decode JPEG/PNG bytes (EXIF orientation applied) for canvas display.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Upright `{width, height}` of encoded image bytes without decoding pixels.
#[wasm_bindgen]
pub fn image_dimensions(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let dimensions =
        decode::read_dimensions(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&dimensions).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixels (3 bytes per pixel, row-major) to JPEG, e.g. a canvas
/// preview cropped with [`crop_image`] before upload.
///
/// `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop encoded image bytes and return an `output_size` square JPEG.
#[wasm_bindgen]
pub fn render_avatar(
    bytes: &[u8],
    crop: &JsCropRegion,
    output_size: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    render::render_avatar(bytes, crop.inner(), output_size, quality).map_err(to_js_error)
}

/// Extract the pixels of `crop` (clamped to the image) from a decoded image.
#[wasm_bindgen]
pub fn crop_image(image: &JsDecodedImage, crop: &JsCropRegion) -> JsDecodedImage {
    apply_crop_region(&image.to_decoded(), crop.inner()).into()
}
