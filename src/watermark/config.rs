//! Watermark configuration types.
//!
//! This module defines the per-image watermark settings:
//! - Logo variant (light or dark artwork)
//! - Opacity as an integer percentage
//! - Scale as a percentage of the source image width
//!
//! Values are always clamped to their declared ranges before use, so a
//! configuration deserialized from YAML or built by a caller can never push
//! the compositor outside its supported domain.

use serde::{Deserialize, Serialize};

/// Lowest scale the interface accepts, in percent of the source width.
pub const MIN_SCALE_PCT: u8 = 10;

/// Highest scale, in percent of the source width.
pub const MAX_SCALE_PCT: u8 = 100;

/// Highest opacity, in percent.
pub const MAX_OPACITY_PCT: u8 = 100;

fn default_opacity() -> u8 {
    40
}

fn default_scale() -> u8 {
    100
}

/// One of the two pre-supplied logo color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoVariant {
    /// Light artwork, for darker photographs (default).
    #[default]
    Light,
    /// Dark artwork, for lighter photographs.
    Dark,
}

impl LogoVariant {
    /// Every variant, in lookup-table order.
    pub const ALL: [LogoVariant; 2] = [LogoVariant::Light, LogoVariant::Dark];

    /// Slot of this variant in the asset table.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for LogoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watermark settings for a single image.
///
/// ```yaml
/// variant: dark
/// opacity: 60
/// scale: 35
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// Which logo artwork to paste (default: light)
    #[serde(default)]
    pub variant: LogoVariant,

    /// Opacity percentage, 0 (invisible) to 100 (logo alpha untouched) (default: 40)
    #[serde(default = "default_opacity")]
    pub opacity: u8,

    /// Logo width as a percentage of the source width, 10 to 100 (default: 100)
    #[serde(default = "default_scale")]
    pub scale: u8,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            variant: LogoVariant::Light,
            opacity: default_opacity(),
            scale: default_scale(),
        }
    }
}

impl WatermarkConfig {
    /// Build a configuration, clamping opacity and scale into range.
    pub fn new(variant: LogoVariant, opacity: u8, scale: u8) -> Self {
        Self {
            variant,
            opacity,
            scale,
        }
        .clamped()
    }

    /// Return a copy with opacity in `[0, 100]` and scale in `[10, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            variant: self.variant,
            opacity: self.opacity.min(MAX_OPACITY_PCT),
            scale: self.scale.clamp(MIN_SCALE_PCT, MAX_SCALE_PCT),
        }
    }

    /// Set the logo variant.
    pub fn with_variant(mut self, variant: LogoVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the opacity percentage (clamped).
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity.min(MAX_OPACITY_PCT);
        self
    }

    /// Set the scale percentage (clamped).
    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale.clamp(MIN_SCALE_PCT, MAX_SCALE_PCT);
        self
    }

    /// Whether the values are already inside their declared ranges.
    pub fn is_in_range(&self) -> bool {
        self.opacity <= MAX_OPACITY_PCT && (MIN_SCALE_PCT..=MAX_SCALE_PCT).contains(&self.scale)
    }
}
