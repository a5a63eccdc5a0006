//! Geometry for watermark placement.
//!
//! Computes how large the logo should be relative to the source image and
//! where its top-left corner lands so the logo is centered.
//!
//! # Example
//!
//! ```ignore
//! use photomark::watermark::position::{centered_position, scaled_dimensions, ImageDimensions, WatermarkDimensions};
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let logo = WatermarkDimensions { width: 400, height: 100 };
//!
//! let wm = scaled_dimensions(&image, &logo, 50);
//! assert_eq!((wm.width, wm.height), (400, 100));
//!
//! let pos = centered_position(&image, &wm);
//! assert_eq!((pos.x, pos.y), (200, 250));
//! ```

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner of the placed watermark.
///
/// May be negative when the scaled logo is taller than the image; the
/// compositor clips anything outside the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size the logo relative to the image width.
///
/// Width is `floor(image.width * scale_pct / 100)`; height keeps the logo's
/// original aspect ratio, rounded to the nearest pixel. Both are floored to
/// 1 so tiny scales or slivers of images never produce an empty watermark.
pub fn scaled_dimensions(
    image: &ImageDimensions,
    logo: &WatermarkDimensions,
    scale_pct: u8,
) -> WatermarkDimensions {
    let width = (image.width as u64 * scale_pct as u64 / 100) as u32;
    let width = width.max(1);

    let height = if logo.width == 0 || logo.height == 0 {
        1
    } else {
        let ratio = logo.width as f64 / logo.height as f64;
        (width as f64 / ratio).round().min(u32::MAX as f64) as u32
    };

    WatermarkDimensions {
        width,
        height: height.max(1),
    }
}

/// Center the watermark on the image (truncating integer division).
pub fn centered_position(
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
) -> PlacementPosition {
    let img_w = image.width as i64;
    let img_h = image.height as i64;
    let wm_w = watermark.width as i64;
    let wm_h = watermark.height as i64;

    PlacementPosition::new(
        clamp_i32((img_w - wm_w) / 2),
        clamp_i32((img_h - wm_h) / 2),
    )
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
