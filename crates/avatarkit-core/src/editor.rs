//! The zoom-and-pan avatar editor.
//!
//! One editor backs one screen instance. It holds the picked image, the
//! latest gesture geometry and the configuration, and turns a save into a
//! [`SaveRequest`] for the upload collaborator.
//!
//! # Event Flow
//!
//! 1. [`AvatarEditor::load_image`] when the picker returns
//! 2. [`AvatarEditor::on_gesture_update`] on every zoom or pan
//! 3. [`AvatarEditor::on_save`] when the user confirms

use serde::{Deserialize, Serialize};

use crate::config::{EditorConfig, UncroppedSave};
use crate::crop::{compute_crop_region, CropRegion};
use crate::error::{AvatarError, AvatarResult};
use crate::layout::{display_layout, DisplayLayout};
use crate::render::render_avatar;
use crate::source::SourceImage;
use crate::viewport::{ViewportState, ZoomEvent};

/// Caller-supplied values forwarded untouched with every save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveExtras {
    /// Team whose avatar is being replaced, if any.
    pub teamname: Option<String>,
    pub send_chat_notification: bool,
}

/// What a save hands to the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub filename: String,
    /// `None` when cropping is disabled and the policy omits the region.
    pub crop: Option<CropRegion>,
    pub extras: SaveExtras,
}

/// Receiver of save requests, typically an uploader.
pub trait AvatarSink {
    fn save(&mut self, request: SaveRequest) -> AvatarResult<()>;
}

impl<F> AvatarSink for F
where
    F: FnMut(SaveRequest) -> AvatarResult<()>,
{
    fn save(&mut self, request: SaveRequest) -> AvatarResult<()> {
        self(request)
    }
}

#[derive(Debug, Clone)]
pub struct AvatarEditor {
    config: EditorConfig,
    image: Option<SourceImage>,
    viewport: ViewportState,
    extras: SaveExtras,
}

impl AvatarEditor {
    pub fn new(config: EditorConfig) -> AvatarResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            image: None,
            viewport: ViewportState::default(),
            extras: SaveExtras::default(),
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn extras(&self) -> &SaveExtras {
        &self.extras
    }

    pub fn set_extras(&mut self, extras: SaveExtras) {
        self.extras = extras;
    }

    /// Show a newly picked image. Gesture state from a previous image is
    /// discarded.
    pub fn load_image(&mut self, image: SourceImage) -> AvatarResult<()> {
        image.validate()?;
        tracing::debug!(
            uri = %image.uri,
            width = image.width,
            height = image.height,
            "loaded avatar image"
        );
        self.image = Some(image);
        self.viewport = ViewportState::default();
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.viewport = ViewportState::default();
    }

    /// Record the latest zoom/pan geometry.
    pub fn on_gesture_update(&mut self, event: ZoomEvent) {
        self.viewport.apply(event);
        tracing::debug!(?event, "gesture update");
    }

    /// Crop region for the current gesture state, whatever the platform.
    pub fn crop_region(&self) -> AvatarResult<CropRegion> {
        let image = self.image.as_ref().ok_or(AvatarError::MissingImage)?;
        let dimensions = image.dimensions();
        let region = compute_crop_region(dimensions, &self.viewport, self.config.avatar_size);

        if region.exceeds(dimensions) {
            tracing::warn!(
                ?region,
                width = dimensions.width,
                height = dimensions.height,
                "crop region extends past image bounds; forwarding unclamped"
            );
        } else {
            tracing::debug!(?region, "computed crop region");
        }
        Ok(region)
    }

    /// Crop forwarded by a save: computed on cropping platforms, otherwise
    /// whatever the [`UncroppedSave`] policy dictates.
    pub fn save_crop(&self) -> AvatarResult<Option<CropRegion>> {
        if self.image.is_none() {
            return Err(AvatarError::MissingImage);
        }
        if self.config.platform.crop_enabled() {
            return self.crop_region().map(Some);
        }
        Ok(match self.config.uncropped_save {
            UncroppedSave::Omit => None,
            UncroppedSave::Identity => Some(CropRegion::identity(self.config.avatar_size)),
            UncroppedSave::Zeroed => Some(CropRegion::zeroed()),
        })
    }

    pub fn save_request(&self) -> AvatarResult<SaveRequest> {
        let image = self.image.as_ref().ok_or(AvatarError::MissingImage)?;
        Ok(SaveRequest {
            filename: image.upload_filename(self.config.platform),
            crop: self.save_crop()?,
            extras: self.extras.clone(),
        })
    }

    /// Build the save request and hand it to `sink`.
    ///
    /// Fails with [`AvatarError::MissingImage`] before touching the sink when
    /// no image is loaded.
    pub fn on_save<S: AvatarSink + ?Sized>(&self, sink: &mut S) -> AvatarResult<()> {
        let request = self.save_request()?;
        tracing::info!(
            filename = %request.filename,
            crop = ?request.crop,
            platform = ?self.config.platform,
            "saving avatar"
        );
        sink.save(request)
    }

    /// Layout of the picked image inside the viewport.
    pub fn display_layout(&self) -> Option<DisplayLayout> {
        self.image.as_ref().map(|image| {
            display_layout(
                image.dimensions(),
                self.config.avatar_size,
                self.config.platform,
            )
        })
    }

    pub fn max_zoom(&self) -> f64 {
        self.config.platform.max_zoom()
    }

    pub fn title(&self) -> &'static str {
        self.config.platform.screen_title()
    }

    /// Render the avatar the server would produce from the current state.
    ///
    /// Without a forwarded crop the server centre-crops, and so does this.
    pub fn render_preview(&self, output_size: u32, quality: u8) -> AvatarResult<Vec<u8>> {
        let image = self.image.as_ref().ok_or(AvatarError::MissingImage)?;
        let data = image.data.as_deref().ok_or(AvatarError::MissingImageData)?;

        let region = match self.save_crop()? {
            Some(region) if !region.is_empty() => region,
            _ => CropRegion::centered_square(image.dimensions()),
        };
        render_avatar(data, &region, output_size, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::encode::encode_jpeg;

    fn ios_editor() -> AvatarEditor {
        AvatarEditor::new(EditorConfig::new(Platform::IosLike)).unwrap()
    }

    fn android_editor(policy: UncroppedSave) -> AvatarEditor {
        let config = EditorConfig::new(Platform::AndroidLike).with_uncropped_save(policy);
        AvatarEditor::new(config).unwrap()
    }

    fn photo() -> SourceImage {
        SourceImage::new("file:///tmp/photo.jpg", 1000, 1000).with_path("/sdcard/photo.jpg")
    }

    /// Sink that records every request it receives.
    #[derive(Default)]
    struct RecordingSink {
        requests: Vec<SaveRequest>,
    }

    impl AvatarSink for RecordingSink {
        fn save(&mut self, request: SaveRequest) -> AvatarResult<()> {
            self.requests.push(request);
            Ok(())
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EditorConfig::default().with_avatar_size(0.0);
        assert!(matches!(
            AvatarEditor::new(config),
            Err(AvatarError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_without_image_fails_and_skips_sink() {
        let editor = ios_editor();
        let mut sink = RecordingSink::default();

        let result = editor.on_save(&mut sink);

        assert!(matches!(result, Err(AvatarError::MissingImage)));
        assert!(sink.requests.is_empty());
    }

    #[test]
    fn test_android_save_without_image_fails() {
        let editor = android_editor(UncroppedSave::Omit);
        let mut calls = 0;
        let result = editor.on_save(&mut |_request: SaveRequest| -> AvatarResult<()> {
            calls += 1;
            Ok(())
        });
        assert!(matches!(result, Err(AvatarError::MissingImage)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_ios_save_forwards_computed_crop() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        editor.on_gesture_update(ZoomEvent::new(500.0, 500.0, 100.0, 50.0));

        let mut sink = RecordingSink::default();
        editor.on_save(&mut sink).unwrap();

        assert_eq!(sink.requests.len(), 1);
        let request = &sink.requests[0];
        assert_eq!(request.filename, "/tmp/photo.jpg");
        assert_eq!(request.crop, Some(CropRegion::new(200, 100, 700, 600)));
        assert_eq!(request.extras, SaveExtras::default());
    }

    #[test]
    fn test_ios_save_before_gesture_uses_identity() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();

        let request = editor.save_request().unwrap();
        assert_eq!(request.crop, Some(CropRegion::new(0, 0, 250, 250)));
    }

    #[test]
    fn test_android_save_ignores_gestures() {
        for (policy, expected) in [
            (UncroppedSave::Omit, None),
            (UncroppedSave::Identity, Some(CropRegion::new(0, 0, 250, 250))),
            (UncroppedSave::Zeroed, Some(CropRegion::zeroed())),
        ] {
            let mut editor = android_editor(policy);
            editor.load_image(photo()).unwrap();
            editor.on_gesture_update(ZoomEvent::new(500.0, 500.0, 100.0, 50.0));

            let request = editor.save_request().unwrap();
            assert_eq!(request.filename, "/sdcard/photo.jpg");
            assert_eq!(request.crop, expected, "policy {:?}", policy);
        }
    }

    #[test]
    fn test_extras_are_forwarded() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        editor.set_extras(SaveExtras {
            teamname: Some("keybasefriends".to_string()),
            send_chat_notification: true,
        });

        let mut sink = RecordingSink::default();
        editor.on_save(&mut sink).unwrap();
        assert_eq!(
            sink.requests[0].extras.teamname.as_deref(),
            Some("keybasefriends")
        );
        assert!(sink.requests[0].extras.send_chat_notification);
    }

    #[test]
    fn test_sink_failure_is_surfaced() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();

        let result = editor.on_save(&mut |_request: SaveRequest| -> AvatarResult<()> {
            Err(AvatarError::Upload("network unreachable".to_string()))
        });
        assert!(matches!(result, Err(AvatarError::Upload(_))));
    }

    #[test]
    fn test_crop_region_is_idempotent() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        editor.on_gesture_update(ZoomEvent::new(1234.0, 987.0, 33.3, 71.9));

        assert_eq!(editor.crop_region().unwrap(), editor.crop_region().unwrap());
    }

    #[test]
    fn test_crop_region_requires_image() {
        assert!(matches!(
            ios_editor().crop_region(),
            Err(AvatarError::MissingImage)
        ));
    }

    #[test]
    fn test_load_image_resets_gestures() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        editor.on_gesture_update(ZoomEvent::new(500.0, 500.0, 100.0, 50.0));

        editor.load_image(photo()).unwrap();
        assert!(editor.viewport().is_unzoomed());
    }

    #[test]
    fn test_load_image_rejects_zero_dimensions() {
        let mut editor = ios_editor();
        let result = editor.load_image(SourceImage::new("file:///x.jpg", 0, 100));
        assert!(matches!(result, Err(AvatarError::InvalidImage { .. })));
        assert!(editor.image().is_none());
    }

    #[test]
    fn test_clear_image() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        editor.clear_image();
        assert!(editor.image().is_none());
        assert!(editor.save_request().is_err());
    }

    #[test]
    fn test_display_layout_and_zoom() {
        let mut editor = android_editor(UncroppedSave::Omit);
        assert!(editor.display_layout().is_none());
        assert_eq!(editor.max_zoom(), 1.0);
        assert_eq!(editor.title(), "Upload avatar");

        editor
            .load_image(SourceImage::new("content://x", 2000, 1000))
            .unwrap();
        let layout = editor.display_layout().unwrap();
        assert_eq!(layout.width, 500.0);
        assert_eq!(layout.margin_left, Some(-125.0));
    }

    #[test]
    fn test_render_preview_requires_data() {
        let mut editor = ios_editor();
        editor.load_image(photo()).unwrap();
        assert!(matches!(
            editor.render_preview(64, 90),
            Err(AvatarError::MissingImageData)
        ));
    }

    #[test]
    fn test_render_preview_produces_square_jpeg() {
        let pixels = vec![90u8; 400 * 300 * 3];
        let jpeg = encode_jpeg(&pixels, 400, 300, 90).unwrap();

        for platform in [Platform::IosLike, Platform::AndroidLike] {
            let mut editor = AvatarEditor::new(EditorConfig::new(platform)).unwrap();
            editor
                .load_image(SourceImage::new("file:///p.jpg", 400, 300).with_data(jpeg.clone()))
                .unwrap();
            editor.on_gesture_update(ZoomEvent::new(250.0, 333.0, 20.0, 0.0));

            let preview = editor.render_preview(64, 90).unwrap();
            let decoded = crate::decode::decode_image(&preview).unwrap();
            assert_eq!((decoded.width, decoded.height), (64, 64));
        }
    }

    #[test]
    fn test_render_preview_after_degenerate_gesture() {
        let jpeg = encode_jpeg(&vec![60u8; 40 * 40 * 3], 40, 40, 90).unwrap();
        let mut editor = ios_editor();
        editor
            .load_image(SourceImage::new("file:///p.jpg", 40, 40).with_data(jpeg))
            .unwrap();
        editor.on_gesture_update(ZoomEvent::new(40.0, 1e-310, -1.0, 0.0));

        let region = editor.crop_region().unwrap();
        assert_eq!((region.x0, region.x1), (i64::MIN, i64::MAX));

        let preview = editor.render_preview(16, 90).unwrap();
        let decoded = crate::decode::decode_image(&preview).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 16));
    }
}
