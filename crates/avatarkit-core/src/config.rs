//! Editor configuration.
//!
//! Platform behaviour is carried as an explicit value so every code path can
//! be exercised without simulating a device.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AvatarError, AvatarResult};

/// Edge length, in pixels, of the square crop viewport on the profile screen.
pub const DEFAULT_AVATAR_SIZE: f64 = 250.0;

/// Host platform of the zoom-and-pan screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    /// Zooming and cropping enabled.
    #[default]
    #[serde(alias = "ios")]
    IosLike,
    /// Zooming disabled; the image is centred and the backend crops it.
    #[serde(alias = "android")]
    AndroidLike,
}

/// Accepts the same names as the serde representation, aliases included.
impl FromStr for Platform {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iosLike" | "ios" => Ok(Platform::IosLike),
            "androidLike" | "android" => Ok(Platform::AndroidLike),
            other => Err(AvatarError::InvalidConfig(format!(
                "unknown platform: {}",
                other
            ))),
        }
    }
}

impl Platform {
    /// Whether a save computes crop coordinates from the gesture state.
    pub fn crop_enabled(self) -> bool {
        matches!(self, Platform::IosLike)
    }

    /// Maximum zoom factor the zoomable container allows.
    pub fn max_zoom(self) -> f64 {
        match self {
            Platform::IosLike => 10.0,
            Platform::AndroidLike => 1.0,
        }
    }

    /// Whether the displayed image gets centering margins.
    pub fn centers_display(self) -> bool {
        matches!(self, Platform::AndroidLike)
    }

    /// Title shown above the viewport.
    pub fn screen_title(self) -> &'static str {
        match self {
            Platform::IosLike => "Zoom and pan",
            Platform::AndroidLike => "Upload avatar",
        }
    }
}

/// What a save forwards as the crop when cropping is disabled by platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UncroppedSave {
    /// Forward no crop region at all.
    #[default]
    Omit,
    /// Forward the identity region (top-left `avatar_size` square).
    Identity,
    /// Forward `{0, 0, 0, 0}`; the server then centre-crops.
    Zeroed,
}

/// Configuration for an [`AvatarEditor`](crate::editor::AvatarEditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub platform: Platform,
    /// Edge length of the square viewport in layout pixels.
    pub avatar_size: f64,
    pub uncropped_save: UncroppedSave,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            avatar_size: DEFAULT_AVATAR_SIZE,
            uncropped_save: UncroppedSave::default(),
        }
    }
}

impl EditorConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Size the viewport to the screen width minus a margin on each side,
    /// as the team avatar screen does.
    pub fn for_screen_width(platform: Platform, screen_width: f64, margin: f64) -> Self {
        Self {
            platform,
            avatar_size: screen_width - margin * 2.0,
            ..Self::default()
        }
    }

    pub fn with_avatar_size(mut self, avatar_size: f64) -> Self {
        self.avatar_size = avatar_size;
        self
    }

    pub fn with_uncropped_save(mut self, uncropped_save: UncroppedSave) -> Self {
        self.uncropped_save = uncropped_save;
        self
    }

    pub fn validate(&self) -> AvatarResult<()> {
        if !self.avatar_size.is_finite() || self.avatar_size <= 0.0 {
            return Err(AvatarError::InvalidConfig(format!(
                "avatar size must be a positive number, got {}",
                self.avatar_size
            )));
        }
        Ok(())
    }
}
