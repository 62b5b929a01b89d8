//! avatarkit WASM - WebAssembly bindings for the avatar crop editor
//!
//! This crate exposes `avatarkit-core` to the JavaScript zoom-and-pan
//! screen.
//!
//! # Module Structure
//!
//! - `editor` - `JsAvatarEditor`: image, gesture state and save
//! - `crop` - Stateless crop coordinate calculation
//! - `render` - Decode, crop and encode helpers for previews and uploads
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsAvatarEditor } from '@avatarkit/wasm';
//!
//! await init();
//!
//! const editor = new JsAvatarEditor({ platform: 'iosLike' });
//! editor.load_image(pickedImage);
//! editor.on_zoom(500, 500, 100, 50);
//! editor.save((filename, crop) => upload(filename, crop));
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod editor;
mod render;
mod types;

pub use crop::compute_crop_region;
pub use editor::JsAvatarEditor;
pub use render::{crop_image, decode_image, encode_jpeg, image_dimensions, render_avatar};
pub use types::{JsCropRegion, JsDecodedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default avatar viewport edge length in layout pixels.
#[wasm_bindgen]
pub fn default_avatar_size() -> f64 {
    avatarkit_core::DEFAULT_AVATAR_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_default_avatar_size() {
        assert_eq!(default_avatar_size(), 250.0);
    }
}
