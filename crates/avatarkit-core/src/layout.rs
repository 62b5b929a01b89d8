//! Initial on-screen size of the picked image inside the square viewport.
//!
//! The image is scaled to cover the viewport: its shorter edge equals the
//! viewport edge and the longer edge overflows. Platforms that do not crop
//! centre the overflow, since that is how the server crops when no
//! coordinates are sent.

use serde::{Deserialize, Serialize};

use crate::config::Platform;
use crate::crop::ImageDimensions;

/// Layout of the image content inside the zoomable container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLayout {
    pub width: f64,
    pub height: f64,
    /// Negative offset centring the overflow horizontally.
    pub margin_left: Option<f64>,
    /// Negative offset centring the overflow vertically.
    pub margin_top: Option<f64>,
}

/// Cover-fit `image` into an `avatar_size` square.
pub fn display_layout(
    image: ImageDimensions,
    avatar_size: f64,
    platform: Platform,
) -> DisplayLayout {
    let (width, height) = cover_dimensions(image, avatar_size);

    let (margin_left, margin_top) = if platform.centers_display() {
        (
            Some((width - avatar_size) / -2.0),
            Some((height - avatar_size) / -2.0),
        )
    } else {
        (None, None)
    };

    DisplayLayout {
        width,
        height,
        margin_left,
        margin_top,
    }
}

fn cover_dimensions(image: ImageDimensions, avatar_size: f64) -> (f64, f64) {
    let w = f64::from(image.width);
    let h = f64::from(image.height);
    if w == 0.0 || h == 0.0 {
        return (avatar_size, avatar_size);
    }

    let width = avatar_size * w / h;
    if width < avatar_size {
        (avatar_size, avatar_size * h / w)
    } else {
        (width, avatar_size)
    }
}
