//! Logo asset store.
//!
//! Holds the light and dark logo artwork in decoded RGBA form. Assets are
//! decoded once at startup and shared read-only by every compositing call;
//! callers that need to modify pixels take their own copy.
//!
//! # Example
//!
//! ```ignore
//! use photomark::watermark::{LogoAssets, LogoVariant};
//!
//! let assets = LogoAssets::load("logo_light.png", "logo_dark.png")?;
//! let logo = assets.get(LogoVariant::Dark);
//! ```

use super::{AssetError, LogoVariant};
use image::io::Reader as ImageReader;
use image::RgbaImage;
use std::path::Path;

/// Immutable table of decoded logo images, indexed by [`LogoVariant`].
#[derive(Clone)]
pub struct LogoAssets {
    logos: [RgbaImage; 2],
}

impl std::fmt::Debug for LogoAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let light = self.get(LogoVariant::Light);
        let dark = self.get(LogoVariant::Dark);
        f.debug_struct("LogoAssets")
            .field("light", &(light.width(), light.height()))
            .field("dark", &(dark.width(), dark.height()))
            .finish()
    }
}

impl LogoAssets {
    /// Decode both logo files.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::AssetMissing`] if either file cannot be opened,
    /// decoded, or has a zero dimension.
    pub fn load(light: impl AsRef<Path>, dark: impl AsRef<Path>) -> Result<Self, AssetError> {
        let light = load_logo(LogoVariant::Light, light.as_ref())?;
        let dark = load_logo(LogoVariant::Dark, dark.as_ref())?;
        Ok(Self::from_images(light, dark))
    }

    /// Build the store from already decoded images.
    pub fn from_images(light: RgbaImage, dark: RgbaImage) -> Self {
        Self {
            logos: [light, dark],
        }
    }

    /// Borrow the logo for a variant.
    pub fn get(&self, variant: LogoVariant) -> &RgbaImage {
        &self.logos[variant.index()]
    }

    /// Original `(width, height)` of a variant's artwork.
    pub fn dimensions(&self, variant: LogoVariant) -> (u32, u32) {
        self.get(variant).dimensions()
    }
}

fn load_logo(variant: LogoVariant, path: &Path) -> Result<RgbaImage, AssetError> {
    let decoded = ImageReader::open(path)
        .map_err(|e| AssetError::missing(variant, path, e))?
        .with_guessed_format()
        .map_err(|e| AssetError::missing(variant, path, e))?
        .decode()
        .map_err(|e| AssetError::missing(variant, path, e))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(AssetError::missing(variant, path, "image has no pixels"));
    }

    if !decoded.color().has_alpha() {
        tracing::warn!(
            variant = %variant,
            path = %path.display(),
            "Logo asset has no alpha channel; it will be pasted as an opaque block"
        );
    }

    let logo = decoded.to_rgba8();
    tracing::info!(
        variant = %variant,
        path = %path.display(),
        width = logo.width(),
        height = logo.height(),
        "Logo asset loaded"
    );

    Ok(logo)
}
