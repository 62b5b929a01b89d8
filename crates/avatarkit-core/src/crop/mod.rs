//! Avatar crop geometry and pixel cropping.
//!
//! A save turns the latest zoom/pan state into a [`CropRegion`] in original
//! image pixels. The region is handed to the upload collaborator as-is; only
//! [`apply_crop_region`] clamps it, when pixels are actually extracted.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the original image
//! - Rendered sizes and pan offsets are layout pixels of the zoomed image
//! - Crop edges are integer pixels of the original image

mod apply;
mod region;

pub use apply::apply_crop_region;
pub use region::{compute_crop_region, compute_scale, CropRegion, ImageDimensions, Scale};
