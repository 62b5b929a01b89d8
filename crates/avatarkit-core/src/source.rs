//! Images handed over by the image picker.

use serde::{Deserialize, Serialize};

use crate::config::Platform;
use crate::crop::ImageDimensions;
use crate::error::{AvatarError, AvatarResult};

const FILE_SCHEME: &str = "file://";

/// A picked image: where it lives, its original pixel size and, optionally,
/// its encoded bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    pub uri: String,
    /// Filesystem path, reported by pickers that expose one.
    #[serde(default)]
    pub path: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes (JPEG), when the picker returned them.
    #[serde(default)]
    pub data: Option<Vec<u8>>,
}

impl SourceImage {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            path: None,
            width,
            height,
            data: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Reject images that report a zero dimension.
    pub fn validate(&self) -> AvatarResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AvatarError::InvalidImage {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Name the upload collaborator expects for this image.
    ///
    /// `IosLike` pickers hand out `file://` URIs, so the first scheme prefix
    /// is removed. `AndroidLike` pickers report a filesystem path; the URI is
    /// used when no path is known.
    pub fn upload_filename(&self, platform: Platform) -> String {
        match platform {
            Platform::IosLike => self.uri.replacen(FILE_SCHEME, "", 1),
            Platform::AndroidLike => self.path.clone().unwrap_or_else(|| self.uri.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ios_filename_strips_scheme() {
        let image = SourceImage::new("file:///var/mobile/tmp/IMG_0001.jpg", 10, 10);
        assert_eq!(
            image.upload_filename(Platform::IosLike),
            "/var/mobile/tmp/IMG_0001.jpg"
        );
    }

    #[test]
    fn test_ios_filename_without_scheme_unchanged() {
        let image = SourceImage::new("/tmp/a.jpg", 10, 10);
        assert_eq!(image.upload_filename(Platform::IosLike), "/tmp/a.jpg");
    }

    #[test]
    fn test_android_filename_prefers_path() {
        let image = SourceImage::new("content://media/external/images/7", 10, 10)
            .with_path("/storage/emulated/0/DCIM/a.jpg");
        assert_eq!(
            image.upload_filename(Platform::AndroidLike),
            "/storage/emulated/0/DCIM/a.jpg"
        );
    }

    #[test]
    fn test_android_filename_falls_back_to_uri() {
        let image = SourceImage::new("content://media/external/images/7", 10, 10);
        assert_eq!(
            image.upload_filename(Platform::AndroidLike),
            "content://media/external/images/7"
        );
    }

    #[test]
    fn test_validate() {
        assert!(SourceImage::new("a", 1, 1).validate().is_ok());
        assert!(matches!(
            SourceImage::new("a", 0, 5).validate(),
            Err(AvatarError::InvalidImage {
                width: 0,
                height: 5
            })
        ));
    }

    #[test]
    fn test_dimensions() {
        let image = SourceImage::new("a", 640, 480);
        assert_eq!(image.dimensions(), ImageDimensions::new(640, 480));
    }
}
