//! Zoom-and-pan gesture state.

use serde::{Deserialize, Serialize};

/// Geometry reported by the zoomable container on every zoom or pan.
///
/// `width`/`height` are the laid-out size of the (possibly zoomed) image and
/// `x`/`y` the content offset visible at the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomEvent {
    pub height: f64,
    pub width: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomEvent {
    pub fn new(height: f64, width: f64, x: f64, y: f64) -> Self {
        Self {
            height,
            width,
            x,
            y,
        }
    }
}

/// Latest rendered size and pan offset of the image inside the viewport.
///
/// All zeros until the first gesture arrives, which the crop calculator
/// treats as identity scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    pub rendered_height: f64,
    pub rendered_width: f64,
    pub pan_offset_x: f64,
    pub pan_offset_y: f64,
}

impl ViewportState {
    pub fn new(
        rendered_width: f64,
        rendered_height: f64,
        pan_offset_x: f64,
        pan_offset_y: f64,
    ) -> Self {
        Self {
            rendered_height,
            rendered_width,
            pan_offset_x,
            pan_offset_y,
        }
    }

    /// Replace every field with the geometry of `event`. Last write wins.
    pub fn apply(&mut self, event: ZoomEvent) {
        *self = Self::from(event);
    }

    /// True until a gesture has reported a non-zero rendered size.
    pub fn is_unzoomed(&self) -> bool {
        self.rendered_width == 0.0 && self.rendered_height == 0.0
    }
}

impl From<ZoomEvent> for ViewportState {
    fn from(event: ZoomEvent) -> Self {
        Self {
            rendered_height: event.height,
            rendered_width: event.width,
            pan_offset_x: event.x,
            pan_offset_y: event.y,
        }
    }
}
