//! Stateless crop coordinate binding.
//!
//! For screens that keep gesture state in JavaScript and only need the math.

use avatarkit_core::{compute_crop_region as core_compute, ImageDimensions, ViewportState};
use wasm_bindgen::prelude::*;

use crate::types::JsCropRegion;

/// Compute the crop region visible through an `avatar_size` square viewport.
///
/// Pass `0` for the rendered size before any zoom gesture has fired; the
/// result is then the top-left `avatar_size` square.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const crop = compute_crop_region(1000, 1000, 500, 500, 100, 50, 250);
/// // crop.x0 === 200, crop.y0 === 100, crop.x1 === 700, crop.y1 === 600
/// ```
#[wasm_bindgen]
pub fn compute_crop_region(
    image_width: u32,
    image_height: u32,
    rendered_width: f64,
    rendered_height: f64,
    pan_offset_x: f64,
    pan_offset_y: f64,
    avatar_size: f64,
) -> JsCropRegion {
    let viewport =
        ViewportState::new(rendered_width, rendered_height, pan_offset_x, pan_offset_y);
    core_compute(
        ImageDimensions::new(image_width, image_height),
        &viewport,
        avatar_size,
    )
    .into()
}
