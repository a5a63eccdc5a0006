//! Watermark compositor for pasting the logo onto photographs.
//!
//! The compositor is a pure transformation: encoded source bytes plus a
//! [`WatermarkConfig`] in, a flattened opaque RGB image out. Per call it:
//!
//! 1. Decodes the source and re-bakes any EXIF orientation
//! 2. Converts to RGBA so the paste step is uniform for every input layout
//! 3. Copies the selected logo and scales its alpha by the opacity
//! 4. Resizes the logo (Lanczos3) relative to the source width
//! 5. Centers it and blends using the logo's own alpha as the weight
//! 6. Drops the alpha channel
//!
//! # Example
//!
//! ```ignore
//! use photomark::watermark::{Compositor, LogoAssets, WatermarkConfig};
//! use std::sync::Arc;
//!
//! let assets = Arc::new(LogoAssets::load("logo_light.png", "logo_dark.png")?);
//! let compositor = Compositor::new(assets);
//!
//! let rgb = compositor.composite(&jpeg_bytes, &WatermarkConfig::default())?;
//! ```

use super::position::{
    centered_position, scaled_dimensions, ImageDimensions, PlacementPosition, WatermarkDimensions,
};
use super::{CompositeError, LogoAssets, WatermarkConfig};
use crate::imaging::{decode_oriented, resize_rgba, thumbnail, ImageError, QualityTier};
use crate::metrics::ExportMetrics;
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};
use std::sync::Arc;
use std::time::Instant;

/// Default bound for the preview thumbnail.
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 600;

/// A prepared watermark ready to be blended onto an image.
#[derive(Clone)]
pub struct WatermarkLayer {
    /// Resized, opacity-scaled logo (RGBA).
    pub image: RgbaImage,
    /// Top-left corner on the target.
    pub position: PlacementPosition,
}

impl std::fmt::Debug for WatermarkLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatermarkLayer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("position", &self.position)
            .finish()
    }
}

/// Compositor bound to a shared, read-only logo asset store.
#[derive(Debug, Clone)]
pub struct Compositor {
    assets: Arc<LogoAssets>,
    preview_max_dimension: u32,
}

impl Compositor {
    pub fn new(assets: Arc<LogoAssets>) -> Self {
        Self {
            assets,
            preview_max_dimension: DEFAULT_PREVIEW_MAX_DIMENSION,
        }
    }

    /// Set the longest side of preview renders.
    pub fn with_preview_max_dimension(mut self, max_dim: u32) -> Self {
        self.preview_max_dimension = max_dim.max(1);
        self
    }

    pub fn assets(&self) -> &LogoAssets {
        &self.assets
    }

    /// Watermark the full-resolution source.
    ///
    /// The result has the same dimensions as the orientation-corrected source.
    pub fn composite(
        &self,
        source: &[u8],
        config: &WatermarkConfig,
    ) -> Result<RgbImage, CompositeError> {
        self.render(source, config, QualityTier::Single)
    }

    /// Watermark the source at the resolution a quality tier calls for.
    ///
    /// `Preview` composites onto a thumbnail bounded by the preview dimension;
    /// `Single` and `Archive` use the full-resolution source.
    pub fn render(
        &self,
        source: &[u8],
        config: &WatermarkConfig,
        tier: QualityTier,
    ) -> Result<RgbImage, CompositeError> {
        let metrics = ExportMetrics::global();

        let started = Instant::now();
        let decoded = decode_oriented(source).map_err(to_composite_error)?;
        metrics.observe_stage("decode", started.elapsed());

        let started = Instant::now();
        let base = match tier {
            QualityTier::Preview => {
                thumbnail(&decoded, self.preview_max_dimension).map_err(to_composite_error)?
            }
            QualityTier::Single | QualityTier::Archive => decoded,
        };
        let result = self.composite_image(&base, config);
        metrics.observe_stage("composite", started.elapsed());

        result
    }

    /// Watermark an already decoded, orientation-corrected image.
    pub fn composite_image(
        &self,
        source: &DynamicImage,
        config: &WatermarkConfig,
    ) -> Result<RgbImage, CompositeError> {
        let config = config.clamped();

        if source.width() == 0 || source.height() == 0 {
            return Err(CompositeError::Composite(format!(
                "source image is {}x{}",
                source.width(),
                source.height()
            )));
        }

        let mut target = source.to_rgba8();
        let image_dims = ImageDimensions {
            width: target.width(),
            height: target.height(),
        };

        let layer = prepare_layer(self.assets.get(config.variant), &image_dims, &config)?;

        tracing::debug!(
            variant = %config.variant,
            opacity = config.opacity,
            scale = config.scale,
            width = image_dims.width,
            height = image_dims.height,
            logo_width = layer.image.width(),
            logo_height = layer.image.height(),
            x = layer.position.x,
            y = layer.position.y,
            "Compositing watermark"
        );

        blend_layer(&mut target, &layer);
        Ok(flatten(&target))
    }
}

fn to_composite_error(err: ImageError) -> CompositeError {
    if err.is_decode() {
        CompositeError::Decode(err.to_string())
    } else {
        CompositeError::Composite(err.to_string())
    }
}

/// Copy the logo, apply opacity, resize it and center it on the image.
pub fn prepare_layer(
    logo: &RgbaImage,
    image_dims: &ImageDimensions,
    config: &WatermarkConfig,
) -> Result<WatermarkLayer, CompositeError> {
    let mut logo = logo.clone();
    scale_alpha(&mut logo, config.opacity);

    let logo_dims = WatermarkDimensions {
        width: logo.width(),
        height: logo.height(),
    };
    let size = scaled_dimensions(image_dims, &logo_dims, config.scale);
    let image = resize_rgba(&logo, size.width, size.height)
        .map_err(|e| CompositeError::Composite(e.to_string()))?;

    Ok(WatermarkLayer {
        image,
        position: centered_position(image_dims, &size),
    })
}

/// Multiply every alpha value by `opacity_pct / 100`, truncating.
///
/// At 100% the logo's alpha is left untouched.
pub fn scale_alpha(logo: &mut RgbaImage, opacity_pct: u8) {
    if opacity_pct >= 100 {
        return;
    }

    let factor = opacity_pct as u32;
    for pixel in logo.pixels_mut() {
        pixel[3] = (pixel[3] as u32 * factor / 100) as u8;
    }
}

/// Paste a layer onto the target, clipped to the target bounds.
///
/// The layer's alpha is the blend weight: transparent pixels leave the target
/// untouched, opaque ones replace it, anything in between mixes linearly.
pub fn blend_layer(target: &mut RgbaImage, layer: &WatermarkLayer) {
    let target_width = target.width() as i64;
    let target_height = target.height() as i64;

    let wm_width = layer.image.width() as i64;
    let wm_height = layer.image.height() as i64;
    let pos_x = layer.position.x as i64;
    let pos_y = layer.position.y as i64;

    // Calculate the visible region (clamp to target bounds)
    let x_start = pos_x.max(0);
    let y_start = pos_y.max(0);
    let x_end = (pos_x + wm_width).min(target_width);
    let y_end = (pos_y + wm_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let wm_pixel = layer.image.get_pixel((tx - pos_x) as u32, (ty - pos_y) as u32);
            let target_pixel = target.get_pixel_mut(tx as u32, ty as u32);
            *target_pixel = blend_pixels(*target_pixel, *wm_pixel);
        }
    }
}

/// Blend a foreground pixel over a background pixel using foreground alpha.
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let alpha = foreground[3] as u32;
    match alpha {
        0 => background,
        255 => Rgba([foreground[0], foreground[1], foreground[2], background[3]]),
        _ => {
            let blend_channel = |fg: u8, bg: u8| -> u8 {
                ((fg as u32 * alpha + bg as u32 * (255 - alpha) + 127) / 255) as u8
            };

            Rgba([
                blend_channel(foreground[0], background[0]),
                blend_channel(foreground[1], background[1]),
                blend_channel(foreground[2], background[2]),
                background[3],
            ])
        }
    }
}

/// Drop the alpha channel.
pub fn flatten(rgba: &RgbaImage) -> RgbImage {
    let mut rgb = Vec::with_capacity(rgba.width() as usize * rgba.height() as usize * 3);

    for chunk in rgba.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }

    // Length is exactly width * height * 3
    RgbImage::from_raw(rgba.width(), rgba.height(), rgb).unwrap_or_else(|| RgbImage::new(0, 0))
}
