//! Crop coordinate calculation.
//!
//! Maps what is visible through the square viewport back into the original
//! image's pixel space.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the original image
//! - `x1`/`y1` are exclusive edges
//! - Regions are NOT clamped to the image; a pan past the rendered edge
//!   yields coordinates beyond `width`/`height`
//!
//! # Rounding
//!
//! Every edge is rounded half away from zero (`f64::round`). For the
//! non-negative offsets a zoomable container reports this matches
//! JavaScript's `Math.round`.

use serde::{Deserialize, Serialize};

use crate::viewport::ViewportState;

/// Pixel dimensions of an original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Ratio between original and rendered image dimensions, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };
}

/// Rectangle to retain, in original image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropRegion {
    pub const fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top-left `avatar_size` square, the region produced at identity scale.
    pub fn identity(avatar_size: f64) -> Self {
        let edge = round_px(avatar_size);
        Self::new(0, 0, edge, edge)
    }

    /// All-zero region; the server treats it as "centre-crop for me".
    pub const fn zeroed() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Largest centred square, the crop a server applies when none is sent.
    pub fn centered_square(image: ImageDimensions) -> Self {
        let w = i64::from(image.width);
        let h = i64::from(image.height);
        let edge = w.min(h);
        let x0 = (w - edge) / 2;
        let y0 = (h - edge) / 2;
        Self::new(x0, y0, x0 + edge, y0 + edge)
    }

    /// Saturates when the edges sit at the `i64` extremes, as they do after a
    /// degenerate gesture drives the scale to infinity.
    pub fn width(&self) -> i64 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> i64 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Whether any edge lies outside `0..=width` / `0..=height`.
    pub fn exceeds(&self, image: ImageDimensions) -> bool {
        self.x0 < 0
            || self.y0 < 0
            || self.x1 > i64::from(image.width)
            || self.y1 > i64::from(image.height)
    }
}

/// Compute the original-to-rendered scale for each axis.
///
/// A zero rendered dimension means no gesture has reported a layout yet;
/// that axis falls back to identity scale instead of dividing by zero.
pub fn compute_scale(image: ImageDimensions, viewport: &ViewportState) -> Scale {
    let y = if viewport.rendered_height != 0.0 {
        f64::from(image.height) / viewport.rendered_height
    } else {
        1.0
    };
    let x = if viewport.rendered_width != 0.0 {
        f64::from(image.width) / viewport.rendered_width
    } else {
        1.0
    };
    Scale { x, y }
}

/// Compute the crop region visible through an `avatar_size` square viewport.
///
/// # Example
///
/// ```
/// use avatarkit_core::crop::{compute_crop_region, CropRegion, ImageDimensions};
/// use avatarkit_core::viewport::ViewportState;
///
/// let image = ImageDimensions::new(1000, 1000);
/// let viewport = ViewportState::new(500.0, 500.0, 100.0, 50.0);
/// let region = compute_crop_region(image, &viewport, 250.0);
/// assert_eq!(region, CropRegion::new(200, 100, 700, 600));
/// ```
pub fn compute_crop_region(
    image: ImageDimensions,
    viewport: &ViewportState,
    avatar_size: f64,
) -> CropRegion {
    let scale = compute_scale(image, viewport);
    let x = viewport.pan_offset_x;
    let y = viewport.pan_offset_y;

    CropRegion {
        x0: round_px(scale.x * x),
        y0: round_px(scale.y * y),
        x1: round_px(scale.x * (x + avatar_size)),
        y1: round_px(scale.y * (y + avatar_size)),
    }
}

/// Round half away from zero. Non-finite input saturates per `as` semantics.
#[inline]
fn round_px(value: f64) -> i64 {
    value.round() as i64
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = ImageDimensions> {
        (1u32..=8000, 1u32..=8000).prop_map(|(w, h)| ImageDimensions::new(w, h))
    }

    fn viewport_strategy() -> impl Strategy<Value = ViewportState> {
        (
            1.0f64..=5000.0, // rendered width
            1.0f64..=5000.0, // rendered height
            0.0f64..=4000.0, // pan x
            0.0f64..=4000.0, // pan y
        )
            .prop_map(|(w, h, x, y)| ViewportState::new(w, h, x, y))
    }

    proptest! {
        /// Property: Without a gesture the region is the top-left avatar square.
        #[test]
        fn prop_unzoomed_is_identity(
            image in dimensions_strategy(),
            avatar_size in 1u32..=1000,
        ) {
            let size = f64::from(avatar_size);
            let region = compute_crop_region(image, &ViewportState::default(), size);
            let edge = i64::from(avatar_size);
            prop_assert_eq!(region, CropRegion::new(0, 0, edge, edge));
        }

        /// Property: Same inputs give the same region.
        #[test]
        fn prop_crop_is_deterministic(
            image in dimensions_strategy(),
            viewport in viewport_strategy(),
        ) {
            let a = compute_crop_region(image, &viewport, 250.0);
            let b = compute_crop_region(image, &viewport, 250.0);
            prop_assert_eq!(a, b);
        }

        /// Property: Region extent equals the scaled viewport edge within rounding.
        #[test]
        fn prop_extent_matches_scaled_viewport(
            image in dimensions_strategy(),
            viewport in viewport_strategy(),
        ) {
            let region = compute_crop_region(image, &viewport, 250.0);
            let scale = compute_scale(image, &viewport);

            let expected_w = 250.0 * scale.x;
            let expected_h = 250.0 * scale.y;
            prop_assert!((region.width() as f64 - expected_w).abs() <= 1.0 + 1e-6);
            prop_assert!((region.height() as f64 - expected_h).abs() <= 1.0 + 1e-6);
        }

        /// Property: Non-negative pan offsets never produce negative edges.
        #[test]
        fn prop_non_negative_pan_gives_non_negative_origin(
            image in dimensions_strategy(),
            viewport in viewport_strategy(),
        ) {
            let region = compute_crop_region(image, &viewport, 250.0);
            prop_assert!(region.x0 >= 0);
            prop_assert!(region.y0 >= 0);
            prop_assert!(region.x1 >= region.x0);
            prop_assert!(region.y1 >= region.y0);
        }

        /// Property: Panning within the rendered image keeps the origin inside it.
        #[test]
        fn prop_origin_inside_image_when_pan_inside_render(
            image in dimensions_strategy(),
            (rendered, frac_x, frac_y) in (1.0f64..=5000.0, 0.0f64..1.0, 0.0f64..1.0),
        ) {
            let viewport =
                ViewportState::new(rendered, rendered, rendered * frac_x, rendered * frac_y);
            let region = compute_crop_region(image, &viewport, 250.0);
            prop_assert!(region.x0 <= i64::from(image.width));
            prop_assert!(region.y0 <= i64::from(image.height));
        }
    }
}
