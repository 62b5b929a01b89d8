//! WASM-compatible wrapper types.
//!
//! These wrap the core crop and image types and convert between Rust and
//! JavaScript representations.

use avatarkit_core::decode::DecodedImage;
use avatarkit_core::CropRegion;
use wasm_bindgen::prelude::*;

/// A crop rectangle in original image pixels.
///
/// Edges are exposed as plain numbers. `x1`/`y1` are exclusive.
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsCropRegion {
    inner: CropRegion,
}

#[wasm_bindgen]
impl JsCropRegion {
    #[wasm_bindgen(constructor)]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> JsCropRegion {
        JsCropRegion {
            inner: CropRegion::new(
                x0.round() as i64,
                y0.round() as i64,
                x1.round() as i64,
                y1.round() as i64,
            ),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x0(&self) -> f64 {
        self.inner.x0 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn y0(&self) -> f64 {
        self.inner.y0 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn x1(&self) -> f64 {
        self.inner.x1 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn y1(&self) -> f64 {
        self.inner.y1 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height() as f64
    }

    /// Plain `{x0, y0, x1, y1}` object, the shape upload helpers take.
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl From<CropRegion> for JsCropRegion {
    fn from(inner: CropRegion) -> Self {
        Self { inner }
    }
}

impl JsCropRegion {
    pub(crate) fn inner(&self) -> &CropRegion {
        &self.inner
    }
}

/// A decoded RGB image for JavaScript.
///
/// Pixel data stays in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA pixels ready for `new ImageData(...)` on a canvas.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }
}

impl JsDecodedImage {
    /// Copy back into a core image for cropping.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

impl From<DecodedImage> for JsDecodedImage {
    fn from(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}
