//! avatarkit core - avatar crop editor
//!
//! This crate turns a zoom-and-pan gesture over a picked image into the crop
//! rectangle an avatar upload needs, and can render that crop to a JPEG.
//!
//! # Module Structure
//!
//! - `crop` - Crop coordinate calculation and pixel cropping
//! - `viewport` - Latest zoom/pan gesture geometry
//! - `editor` - Screen-level state: image, gestures, save
//! - `layout` - Initial display size and centring of the image
//! - `config` - Platform and viewport configuration
//! - `decode` / `encode` / `render` - Decode, crop, resize, encode pipeline
//!
//! # Example
//!
//! ```ignore
//! use avatarkit_core::{AvatarEditor, EditorConfig, SourceImage, ZoomEvent};
//!
//! let mut editor = AvatarEditor::new(EditorConfig::default())?;
//! editor.load_image(SourceImage::new("file:///tmp/me.jpg", 1000, 1000))?;
//! editor.on_gesture_update(ZoomEvent::new(500.0, 500.0, 100.0, 50.0));
//! editor.on_save(&mut |request| upload(request))?;
//! ```

pub mod config;
pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod layout;
pub mod render;
pub mod source;
pub mod viewport;

pub use config::{EditorConfig, Platform, UncroppedSave, DEFAULT_AVATAR_SIZE};
pub use crop::{compute_crop_region, compute_scale, CropRegion, ImageDimensions, Scale};
pub use editor::{AvatarEditor, AvatarSink, SaveExtras, SaveRequest};
pub use error::{AvatarError, AvatarResult};
pub use layout::{display_layout, DisplayLayout};
pub use render::{render_avatar, DEFAULT_OUTPUT_SIZE};
pub use source::SourceImage;
pub use viewport::{ViewportState, ZoomEvent};
