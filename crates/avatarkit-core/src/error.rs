//! Error types for the avatar editor.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

pub type AvatarResult<T> = std::result::Result<T, AvatarError>;

/// Errors surfaced by the editor and the render pipeline.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Save (or crop) was requested before an image was loaded.
    #[error("Missing image when saving avatar")]
    MissingImage,

    /// A render was requested but the picker returned no image bytes.
    #[error("Image has no encoded data to render")]
    MissingImageData,

    /// The picked image reports a zero dimension.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// A configuration value is out of range.
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    /// The upload collaborator rejected the save request.
    #[error("Avatar upload failed: {0}")]
    Upload(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_display() {
        assert_eq!(
            AvatarError::MissingImage.to_string(),
            "Missing image when saving avatar"
        );
    }

    #[test]
    fn test_invalid_image_display() {
        let err = AvatarError::InvalidImage {
            width: 0,
            height: 20,
        };
        assert_eq!(err.to_string(), "Invalid image dimensions: 0x20");
    }

    #[test]
    fn test_decode_error_is_transparent() {
        let err = AvatarError::from(DecodeError::InvalidFormat);
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
