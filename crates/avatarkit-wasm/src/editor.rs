//! WASM binding for the zoom-and-pan avatar editor.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsAvatarEditor({ platform: 'iosLike', avatarSize: 250 });
//! const { uri, path, width, height } = pickedImage;
//! editor.load_image({ uri, path, width, height });
//!
//! // Wire the zoomable container
//! <ZoomableBox onZoom={({height, width, x, y}) => editor.on_zoom(height, width, x, y)} />
//!
//! // Save button
//! editor.save((filename, crop, teamname, sendChatNotification) => {
//!   uploadAvatar(filename, crop, teamname, sendChatNotification)
//! });
//! ```

use avatarkit_core::{
    AvatarEditor, AvatarError, AvatarResult, EditorConfig, Platform, SaveExtras, SaveRequest,
    SourceImage, ZoomEvent,
};
use js_sys::{Array, Function};
use wasm_bindgen::prelude::*;

use crate::types::JsCropRegion;

#[wasm_bindgen]
pub struct JsAvatarEditor {
    inner: AvatarEditor,
}

#[wasm_bindgen]
impl JsAvatarEditor {
    /// Create an editor from a `{platform, avatarSize, uncroppedSave}` object.
    ///
    /// `undefined` or `null` selects the defaults. Throws on an object that
    /// does not parse (an unknown platform, say) or on out-of-range values.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsAvatarEditor, JsValue> {
        let config = parse_config(config).map_err(to_js_error)?;
        Self::from_config(config).map_err(to_js_error)
    }

    /// Create an editor whose viewport spans the screen width minus `margin`
    /// on each side.
    pub fn for_screen_width(
        platform: &str,
        screen_width: f64,
        margin: f64,
    ) -> Result<JsAvatarEditor, JsValue> {
        let platform: Platform = platform.parse().map_err(to_js_error)?;
        Self::from_config(EditorConfig::for_screen_width(platform, screen_width, margin))
            .map_err(to_js_error)
    }

    /// Load a picked image: `{uri, path?, width, height, data?}`.
    pub fn load_image(&mut self, image: JsValue) -> Result<(), JsValue> {
        let image: SourceImage = serde_wasm_bindgen::from_value(image)
            .map_err(|e| JsValue::from_str(&format!("Invalid image: {}", e)))?;
        self.inner.load_image(image).map_err(to_js_error)
    }

    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.image().is_some()
    }

    /// Record zoom/pan geometry reported by the zoomable container.
    ///
    /// Events carrying `NaN` or infinite values (a missing field coerced by
    /// JavaScript) are dropped with a console warning.
    pub fn on_zoom(&mut self, height: f64, width: f64, x: f64, y: f64) {
        if ![height, width, x, y].iter().all(|v| v.is_finite()) {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "ignoring zoom event with non-finite geometry: \
                 height={} width={} x={} y={}",
                height, width, x, y
            )));
            return;
        }
        self.inner.on_gesture_update(ZoomEvent::new(height, width, x, y));
    }

    /// Set the team name and chat notification flag forwarded with saves.
    pub fn set_team(&mut self, teamname: Option<String>, send_chat_notification: bool) {
        self.inner.set_extras(SaveExtras {
            teamname,
            send_chat_notification,
        });
    }

    /// Crop region for the current gesture state.
    pub fn crop_coordinates(&self) -> Result<JsCropRegion, JsValue> {
        self.inner
            .crop_region()
            .map(JsCropRegion::from)
            .map_err(to_js_error)
    }

    /// Invoke `on_save(filename, crop, teamname, sendChatNotification)`.
    ///
    /// `crop` is a plain `{x0, y0, x1, y1}` object, or `undefined` when the
    /// platform does not crop and the configuration omits the region.
    /// Throws without calling `on_save` when no image is loaded.
    pub fn save(&self, on_save: &Function) -> Result<(), JsValue> {
        let mut sink = |request: SaveRequest| -> AvatarResult<()> {
            let args = save_arguments(&request)
                .map_err(|e| AvatarError::Upload(describe_js_error(&e)))?;
            on_save
                .apply(&JsValue::NULL, &args)
                .map(|_| ())
                .map_err(|e| AvatarError::Upload(describe_js_error(&e)))
        };
        self.inner.on_save(&mut sink).map_err(to_js_error)
    }

    /// `{width, height, marginLeft?, marginTop?}` for the image content, or
    /// `null` when no image is loaded.
    pub fn display_layout(&self) -> Result<JsValue, JsValue> {
        match self.inner.display_layout() {
            Some(layout) => serde_wasm_bindgen::to_value(&layout)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn max_zoom(&self) -> f64 {
        self.inner.max_zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.inner.title().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn avatar_size(&self) -> f64 {
        self.inner.config().avatar_size
    }

    /// JPEG preview of the avatar the current state would produce.
    /// Requires the image to have been loaded with `data`.
    pub fn render_preview(&self, output_size: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.inner
            .render_preview(output_size, quality)
            .map_err(to_js_error)
    }
}

impl JsAvatarEditor {
    pub(crate) fn from_config(config: EditorConfig) -> AvatarResult<Self> {
        Ok(Self {
            inner: AvatarEditor::new(config)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &AvatarEditor {
        &self.inner
    }
}

fn parse_config(value: JsValue) -> AvatarResult<EditorConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| AvatarError::InvalidConfig(format!("invalid avatar editor config: {}", e)))
}

fn save_arguments(request: &SaveRequest) -> Result<Array, JsValue> {
    let crop = match &request.crop {
        Some(region) => serde_wasm_bindgen::to_value(region)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => JsValue::UNDEFINED,
    };
    let teamname = match &request.extras.teamname {
        Some(name) => JsValue::from_str(name),
        None => JsValue::UNDEFINED,
    };

    let args = Array::new();
    args.push(&JsValue::from_str(&request.filename));
    args.push(&crop);
    args.push(&teamname);
    args.push(&JsValue::from_bool(request.extras.send_chat_notification));
    Ok(args)
}

fn describe_js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub(crate) fn to_js_error(err: AvatarError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
